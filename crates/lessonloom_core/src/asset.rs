//! Opaque asset identifiers.

use serde::{Deserialize, Serialize};

/// Identifier of a binary artifact held by an external asset store.
///
/// The pipeline never dereferences these; they only travel on [`crate::Page`]
/// and [`crate::Course`] so callers can find their blobs again.
///
/// # Examples
///
/// ```
/// use lessonloom_core::AssetId;
///
/// let id = AssetId::from("page-3-audio.wav");
/// assert_eq!(id.as_str(), "page-3-audio.wav");
/// assert_eq!(id.to_string(), "page-3-audio.wav");
/// ```
#[derive(
    Debug,
    Clone,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    derive_more::Display,
    derive_more::From,
)]
#[serde(transparent)]
pub struct AssetId(String);

impl AssetId {
    /// Borrow the identifier as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for AssetId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}
