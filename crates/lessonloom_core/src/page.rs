//! Page entity and its video generation parameters.

use crate::AssetId;
use serde::{Deserialize, Serialize};

/// Output resolution requested from the video model.
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    strum::EnumIter,
    strum::EnumString,
    derive_more::Display,
)]
pub enum VideoResolution {
    /// 1280x720
    #[default]
    #[serde(rename = "720p")]
    #[strum(serialize = "720p")]
    #[display("720p")]
    Hd720,
    /// 1920x1080
    #[serde(rename = "1080p")]
    #[strum(serialize = "1080p")]
    #[display("1080p")]
    Hd1080,
}

/// Frame aspect ratio requested from the video model.
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    strum::EnumString,
    derive_more::Display,
)]
pub enum AspectRatio {
    /// Landscape
    #[default]
    #[serde(rename = "16:9")]
    #[strum(serialize = "16:9")]
    #[display("16:9")]
    Landscape,
    /// Portrait
    #[serde(rename = "9:16")]
    #[strum(serialize = "9:16")]
    #[display("9:16")]
    Portrait,
}

/// One scanned textbook page and everything generated from it.
///
/// A page starts out with only its image reference; every other field is
/// filled in by the caller as stage results come back.
///
/// `extracted_text` and `image_description` may be edited freely until the
/// operator sets `is_page_analysis_confirmed`. From then on they are the
/// source of truth every downstream stage quotes verbatim.
///
/// # Examples
///
/// ```
/// use lessonloom_core::{AssetId, Page};
///
/// let page = Page::new("p1", 1, AssetId::from("scan-001.png"));
/// assert!(page.extracted_text.is_empty());
/// assert!(!page.is_page_analysis_confirmed);
/// assert_eq!(page.teacher_speed, 1.0);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Page {
    /// Page identifier
    pub id: String,
    /// Page number within the course
    pub page_number: u32,
    /// Raw page image
    pub image: Option<AssetId>,

    /// Free-form analysis of the page
    pub analysis: String,
    /// Text transcribed from the page
    pub extracted_text: String,
    /// Description of the page's visual content
    pub image_description: String,
    /// Set by the operator once extracted text and description are correct
    pub is_page_analysis_confirmed: bool,

    /// Narration script read by the teacher voice
    pub teacher_script: String,
    /// Synthesized narration
    pub teacher_audio: Option<AssetId>,
    /// Voice used for narration
    pub teacher_voice: String,
    /// Playback speed multiplier for narration
    pub teacher_speed: f32,
    /// Whether narration is part of the published lesson
    pub include_teacher: bool,

    /// Prompt used to draw the storyboard image
    pub storyboard_prompt: String,
    /// Generated storyboard image
    pub storyboard_image: Option<AssetId>,
    /// Whether the storyboard is part of the published lesson
    pub include_storyboard: bool,

    /// Prompt used to animate the page
    pub video_prompt: String,
    /// Generated video clip
    pub video: Option<AssetId>,
    /// Requested video resolution
    pub video_resolution: VideoResolution,
    /// Whether the video is part of the published lesson
    pub include_video: bool,

    /// Two-participant dialogue script
    pub dialogue_script: String,
    /// Synthesized dialogue
    pub dialogue_audio: Option<AssetId>,
    /// Playback speed multiplier for dialogue
    pub dialogue_speed: f32,
    /// Whether the dialogue is part of the published lesson
    pub include_dialogue: bool,
}

impl Default for Page {
    fn default() -> Self {
        Self {
            id: String::new(),
            page_number: 0,
            image: None,
            analysis: String::new(),
            extracted_text: String::new(),
            image_description: String::new(),
            is_page_analysis_confirmed: false,
            teacher_script: String::new(),
            teacher_audio: None,
            teacher_voice: "Kore".to_string(),
            teacher_speed: 1.0,
            include_teacher: true,
            storyboard_prompt: String::new(),
            storyboard_image: None,
            include_storyboard: true,
            video_prompt: String::new(),
            video: None,
            video_resolution: VideoResolution::default(),
            include_video: true,
            dialogue_script: String::new(),
            dialogue_audio: None,
            dialogue_speed: 1.0,
            include_dialogue: true,
        }
    }
}

impl Page {
    /// Create an unprocessed page for a freshly ingested image.
    pub fn new(id: impl Into<String>, page_number: u32, image: AssetId) -> Self {
        Self {
            id: id.into(),
            page_number,
            image: Some(image),
            ..Default::default()
        }
    }
}
