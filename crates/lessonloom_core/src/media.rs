//! Binary media flowing in and out of stages.

use derive_getters::Getters;
use serde::{Deserialize, Serialize};

/// Type of media content.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    strum::EnumIter,
    derive_more::Display,
)]
pub enum MediaKind {
    /// Image content
    #[display("image")]
    Image,
    /// Audio content
    #[display("audio")]
    Audio,
    /// Video content
    #[display("video")]
    Video,
}

/// A freshly produced artifact handed back to the caller for storage.
///
/// # Examples
///
/// ```
/// use lessonloom_core::{MediaBlob, MediaKind};
///
/// let blob = MediaBlob::image("image/png", vec![0x89, 0x50, 0x4E, 0x47]);
/// assert_eq!(*blob.kind(), MediaKind::Image);
/// assert_eq!(blob.extension(), "png");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Getters)]
pub struct MediaBlob {
    /// What sort of media this is
    kind: MediaKind,
    /// Declared MIME type
    mime_type: String,
    /// Raw bytes
    data: Vec<u8>,
}

impl MediaBlob {
    /// An image blob with the MIME type the service declared.
    pub fn image(mime_type: impl Into<String>, data: Vec<u8>) -> Self {
        Self {
            kind: MediaKind::Image,
            mime_type: mime_type.into(),
            data,
        }
    }

    /// A WAV audio blob.
    pub fn wav(data: Vec<u8>) -> Self {
        Self {
            kind: MediaKind::Audio,
            mime_type: "audio/wav".to_string(),
            data,
        }
    }

    /// A video blob.
    pub fn video(mime_type: impl Into<String>, data: Vec<u8>) -> Self {
        Self {
            kind: MediaKind::Video,
            mime_type: mime_type.into(),
            data,
        }
    }

    /// Consume the blob, keeping only its bytes.
    pub fn into_data(self) -> Vec<u8> {
        self.data
    }

    /// File extension matching the MIME type.
    pub fn extension(&self) -> &'static str {
        match self.mime_type.as_str() {
            "image/png" => "png",
            "image/jpeg" | "image/jpg" => "jpg",
            "image/webp" => "webp",
            "audio/wav" | "audio/x-wav" => "wav",
            "video/mp4" => "mp4",
            "video/webm" => "webm",
            _ => match self.kind {
                MediaKind::Image => "img",
                MediaKind::Audio => "audio",
                MediaKind::Video => "video",
            },
        }
    }
}

/// A raw page image supplied as stage input.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Getters)]
pub struct PageImage {
    /// MIME type, e.g. `image/jpeg`
    mime_type: String,
    /// Raw image bytes
    bytes: Vec<u8>,
}

impl PageImage {
    /// Wrap raw image bytes.
    pub fn new(mime_type: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            mime_type: mime_type.into(),
            bytes,
        }
    }
}
