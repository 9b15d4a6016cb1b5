//! Operator-verified page content.

use crate::Page;
use derive_getters::Getters;
use tracing::warn;

/// The verified extracted text and image description of a page.
///
/// Downstream prompts embed these strings exactly as stored. Empty strings are
/// carried through as-is; the stage still runs.
#[derive(Debug, Clone, PartialEq, Eq, Getters)]
pub struct VerifiedSource {
    /// Transcribed page text
    extracted_text: String,
    /// Description of the page's visuals
    image_description: String,
    /// Whether the operator had confirmed the fields
    confirmed: bool,
}

impl VerifiedSource {
    /// Build a source from values the caller vouches for.
    pub fn new(extracted_text: impl Into<String>, image_description: impl Into<String>) -> Self {
        Self {
            extracted_text: extracted_text.into(),
            image_description: image_description.into(),
            confirmed: true,
        }
    }

    /// Take the page's current fields.
    ///
    /// Unconfirmed pages are accepted so drafts can be previewed, but the gap
    /// is logged.
    pub fn from_page(page: &Page) -> Self {
        if !page.is_page_analysis_confirmed {
            warn!(
                page_id = %page.id,
                page_number = page.page_number,
                "Using unconfirmed page analysis as source of truth"
            );
        }
        Self {
            extracted_text: page.extracted_text.clone(),
            image_description: page.image_description.clone(),
            confirmed: page.is_page_analysis_confirmed,
        }
    }
}
