//! Long-running video generation job types.

use crate::InlineData;
use lessonloom_core::{AspectRatio, PageImage, VideoResolution};
use serde::{Deserialize, Serialize};

/// Submission parameters for a video job.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VideoJobRequest {
    /// Visual prompt (already translated to English)
    pub prompt: String,
    /// First frame / reference image
    pub image: Option<InlineData>,
    /// Output resolution
    pub resolution: VideoResolution,
    /// Frame aspect ratio
    pub aspect_ratio: AspectRatio,
    /// How many clips to generate
    pub number_of_videos: u32,
}

impl VideoJobRequest {
    /// A single-clip request seeded with a page image.
    pub fn single(
        prompt: impl Into<String>,
        image: &PageImage,
        resolution: VideoResolution,
        aspect_ratio: AspectRatio,
    ) -> Self {
        Self {
            prompt: prompt.into(),
            image: Some(InlineData::encode(image.mime_type().clone(), image.bytes())),
            resolution,
            aspect_ratio,
            number_of_videos: 1,
        }
    }
}

/// Handle to a remote video job.
///
/// `name` is the job's own handle; refreshing status always goes through it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VideoJob {
    /// Server-assigned job name
    pub name: String,
    /// Completion flag
    pub done: bool,
    /// Generated clips, populated once `done`
    #[serde(default)]
    pub videos: Vec<GeneratedVideo>,
    /// Error reported by the service for a finished job
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl VideoJob {
    /// A job that has not finished yet.
    pub fn pending(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    /// A finished job with one clip at `uri`.
    pub fn completed(name: impl Into<String>, uri: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            done: true,
            videos: vec![GeneratedVideo {
                uri: Some(uri.into()),
                mime_type: Some("video/mp4".to_string()),
            }],
            error: None,
        }
    }

    /// Locator of the first generated clip, if any.
    pub fn result_uri(&self) -> Option<&str> {
        self.videos
            .first()
            .and_then(|video| video.uri.as_deref())
            .filter(|uri| !uri.is_empty())
    }
}

/// One generated clip.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GeneratedVideo {
    /// Download locator; requires the credential appended
    pub uri: Option<String>,
    /// Declared MIME type
    pub mime_type: Option<String>,
}
