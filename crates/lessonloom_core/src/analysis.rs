//! Structured page analysis and its parse outcome.

use serde::{Deserialize, Serialize};

/// Marker placed in `analysis` when the structured response could not be read.
const ANALYSIS_FALLBACK: &str = "Error parsing analysis.";

/// Result of the page analysis stage.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageAnalysis {
    /// Free-form analysis of the page's teaching content
    pub analysis: String,
    /// Text transcribed from the page
    pub extracted_text: String,
    /// Description of the page's visual content
    pub image_description: String,
}

impl PageAnalysis {
    /// The fixed value returned when the response is not valid structured data.
    ///
    /// # Examples
    ///
    /// ```
    /// use lessonloom_core::PageAnalysis;
    ///
    /// let fallback = PageAnalysis::fallback();
    /// assert_eq!(fallback.analysis, "Error parsing analysis.");
    /// assert!(fallback.extracted_text.is_empty());
    /// assert!(fallback.image_description.is_empty());
    /// ```
    pub fn fallback() -> Self {
        Self {
            analysis: ANALYSIS_FALLBACK.to_string(),
            extracted_text: String::new(),
            image_description: String::new(),
        }
    }
}

/// A value parsed from a structured response, or the fallback used instead.
///
/// Parse failures are not errors; they degrade to a documented value while
/// keeping the reason so callers can log or surface it.
///
/// # Examples
///
/// ```
/// use lessonloom_core::{PageAnalysis, StructuredOutcome};
///
/// let outcome = StructuredOutcome::Fallback {
///     value: PageAnalysis::fallback(),
///     reason: "expected value at line 1 column 1".to_string(),
/// };
/// assert!(outcome.is_fallback());
/// assert_eq!(outcome.value(), &PageAnalysis::fallback());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StructuredOutcome<T> {
    /// The response parsed cleanly.
    Parsed(T),
    /// The response was unusable; `value` is the documented fallback.
    Fallback {
        /// Fallback value
        value: T,
        /// Why parsing failed
        reason: String,
    },
}

impl<T> StructuredOutcome<T> {
    /// Borrow the value regardless of how it was obtained.
    pub fn value(&self) -> &T {
        match self {
            StructuredOutcome::Parsed(value) | StructuredOutcome::Fallback { value, .. } => value,
        }
    }

    /// Take the value regardless of how it was obtained.
    pub fn into_value(self) -> T {
        match self {
            StructuredOutcome::Parsed(value) | StructuredOutcome::Fallback { value, .. } => value,
        }
    }

    /// Whether the fallback was used.
    pub fn is_fallback(&self) -> bool {
        matches!(self, StructuredOutcome::Fallback { .. })
    }

    /// The parse failure, if any.
    pub fn fallback_reason(&self) -> Option<&str> {
        match self {
            StructuredOutcome::Parsed(_) => None,
            StructuredOutcome::Fallback { reason, .. } => Some(reason),
        }
    }
}
