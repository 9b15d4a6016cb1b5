//! Content generation request and response types.

use base64::{Engine as _, engine::general_purpose::STANDARD as BASE64};
use lessonloom_core::PageImage;
use serde::{Deserialize, Serialize};

//
// ─── REQUEST ────────────────────────────────────────────────────────────────
//

/// A content generation request.
///
/// # Examples
///
/// ```
/// use lessonloom_interface::{GenerateContentRequest, GenerationConfig, Part};
///
/// let request = GenerateContentRequest::from_parts(vec![Part::text("Hello")])
///     .with_config(GenerationConfig {
///         temperature: Some(0.2),
///         ..Default::default()
///     });
/// assert_eq!(request.contents.len(), 1);
/// assert!(request.text().contains("Hello"));
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateContentRequest {
    /// Conversation contents (a single user turn for every stage)
    pub contents: Vec<Content>,

    /// Generation parameters
    #[serde(skip_serializing_if = "Option::is_none")]
    pub generation_config: Option<GenerationConfig>,
}

impl GenerateContentRequest {
    /// A single user turn made of the given parts.
    pub fn from_parts(parts: Vec<Part>) -> Self {
        Self {
            contents: vec![Content {
                role: Some("user".to_string()),
                parts,
            }],
            generation_config: None,
        }
    }

    /// Attach generation parameters.
    pub fn with_config(mut self, config: GenerationConfig) -> Self {
        self.generation_config = Some(config);
        self
    }

    /// All text parts joined by newlines.
    pub fn text(&self) -> String {
        self.contents
            .iter()
            .flat_map(|content| &content.parts)
            .filter_map(Part::as_text)
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// All inline media parts, in order.
    pub fn inline_data(&self) -> Vec<&InlineData> {
        self.contents
            .iter()
            .flat_map(|content| &content.parts)
            .filter_map(Part::as_inline_data)
            .collect()
    }
}

/// One conversation turn.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Content {
    /// Role ("user", "model")
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,

    /// Content parts
    #[serde(default)]
    pub parts: Vec<Part>,
}

/// Content part (text, inline data, or anything else the service sends).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Part {
    /// Text content
    Text(TextPart),
    /// Inline data (images, audio)
    InlineData(InlineDataPart),
    /// Parts this client does not interpret
    Other(serde_json::Value),
}

impl Part {
    /// A text part.
    pub fn text(text: impl Into<String>) -> Self {
        Part::Text(TextPart { text: text.into() })
    }

    /// An inline media part, base64-encoding the bytes.
    pub fn inline(mime_type: impl Into<String>, bytes: &[u8]) -> Self {
        Part::InlineData(InlineDataPart {
            inline_data: InlineData::encode(mime_type, bytes),
        })
    }

    /// An inline part carrying a page image.
    pub fn image(image: &PageImage) -> Self {
        Self::inline(image.mime_type().clone(), image.bytes())
    }

    /// The text, if this is a text part.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Part::Text(part) => Some(&part.text),
            _ => None,
        }
    }

    /// The inline data, if this is a media part.
    pub fn as_inline_data(&self) -> Option<&InlineData> {
        match self {
            Part::InlineData(part) => Some(&part.inline_data),
            _ => None,
        }
    }
}

/// Text content part.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextPart {
    /// The text
    pub text: String,
}

/// Inline data content part.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InlineDataPart {
    /// The payload
    pub inline_data: InlineData,
}

/// Inline data with MIME type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InlineData {
    /// Declared MIME type
    #[serde(default)]
    pub mime_type: String,
    /// Base64-encoded bytes
    pub data: String,
}

impl InlineData {
    /// Encode raw bytes.
    pub fn encode(mime_type: impl Into<String>, bytes: &[u8]) -> Self {
        Self {
            mime_type: mime_type.into(),
            data: BASE64.encode(bytes),
        }
    }

    /// Decode the payload to raw bytes.
    pub fn decode(&self) -> Result<Vec<u8>, base64::DecodeError> {
        BASE64.decode(self.data.as_bytes())
    }
}

/// Requested output modality.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, strum::Display,
)]
#[serde(rename_all = "UPPERCASE")]
#[strum(serialize_all = "UPPERCASE")]
pub enum ResponseModality {
    /// Text output
    Text,
    /// Audio output
    Audio,
    /// Image output
    Image,
}

/// Generation configuration parameters.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerationConfig {
    /// Temperature for sampling
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f32>,

    /// Response modalities (e.g. `["AUDIO"]`)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub response_modalities: Option<Vec<ResponseModality>>,

    /// MIME type of structured output (`application/json`)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub response_mime_type: Option<String>,

    /// Schema the structured output must satisfy
    #[serde(skip_serializing_if = "Option::is_none")]
    pub response_schema: Option<serde_json::Value>,

    /// Voice selection for audio output
    #[serde(skip_serializing_if = "Option::is_none")]
    pub speech_config: Option<SpeechConfig>,
}

/// Voice selection for speech synthesis.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SpeechConfig {
    /// Single voice
    #[serde(skip_serializing_if = "Option::is_none")]
    pub voice_config: Option<VoiceConfig>,

    /// Speaker label to voice mapping
    #[serde(skip_serializing_if = "Option::is_none")]
    pub multi_speaker_voice_config: Option<MultiSpeakerVoiceConfig>,
}

impl SpeechConfig {
    /// One prebuilt voice.
    pub fn single(voice_name: impl Into<String>) -> Self {
        Self {
            voice_config: Some(VoiceConfig::prebuilt(voice_name)),
            multi_speaker_voice_config: None,
        }
    }

    /// A fixed speaker-to-voice mapping.
    pub fn multi_speaker<S, V>(speakers: impl IntoIterator<Item = (S, V)>) -> Self
    where
        S: Into<String>,
        V: Into<String>,
    {
        Self {
            voice_config: None,
            multi_speaker_voice_config: Some(MultiSpeakerVoiceConfig {
                speaker_voice_configs: speakers
                    .into_iter()
                    .map(|(speaker, voice)| SpeakerVoiceConfig {
                        speaker: speaker.into(),
                        voice_config: VoiceConfig::prebuilt(voice),
                    })
                    .collect(),
            }),
        }
    }
}

/// Voice configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VoiceConfig {
    /// A named prebuilt voice
    pub prebuilt_voice_config: PrebuiltVoiceConfig,
}

impl VoiceConfig {
    /// Select a prebuilt voice by name.
    pub fn prebuilt(voice_name: impl Into<String>) -> Self {
        Self {
            prebuilt_voice_config: PrebuiltVoiceConfig {
                voice_name: voice_name.into(),
            },
        }
    }
}

/// Prebuilt voice name.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PrebuiltVoiceConfig {
    /// Voice identifier (e.g. "Kore")
    pub voice_name: String,
}

/// Mapping of dialogue speakers to voices.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MultiSpeakerVoiceConfig {
    /// One entry per speaker label
    pub speaker_voice_configs: Vec<SpeakerVoiceConfig>,
}

/// One speaker's voice.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SpeakerVoiceConfig {
    /// Speaker label as it appears in the script
    pub speaker: String,
    /// Voice for that speaker
    pub voice_config: VoiceConfig,
}

//
// ─── RESPONSE ───────────────────────────────────────────────────────────────
//

/// A content generation response.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateContentResponse {
    /// Candidate results
    #[serde(default)]
    pub candidates: Vec<Candidate>,
}

/// One candidate result.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Candidate {
    /// Generated content
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<Content>,

    /// Why generation stopped
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub finish_reason: Option<String>,
}

impl GenerateContentResponse {
    /// A response with one candidate holding the given parts.
    pub fn from_parts(parts: Vec<Part>) -> Self {
        Self {
            candidates: vec![Candidate {
                content: Some(Content {
                    role: Some("model".to_string()),
                    parts,
                }),
                finish_reason: Some("STOP".to_string()),
            }],
        }
    }

    /// A response with one text part.
    pub fn from_text(text: impl Into<String>) -> Self {
        Self::from_parts(vec![Part::text(text)])
    }

    /// Parts of the first candidate.
    pub fn first_candidate_parts(&self) -> &[Part] {
        self.candidates
            .first()
            .and_then(|candidate| candidate.content.as_ref())
            .map(|content| content.parts.as_slice())
            .unwrap_or_default()
    }

    /// The primary text field: the first candidate's text parts concatenated.
    ///
    /// Returns `None` when the first candidate has no text at all.
    ///
    /// # Examples
    ///
    /// ```
    /// use lessonloom_interface::GenerateContentResponse;
    ///
    /// assert_eq!(GenerateContentResponse::from_text("hi").text().as_deref(), Some("hi"));
    /// assert_eq!(GenerateContentResponse::default().text(), None);
    /// ```
    pub fn text(&self) -> Option<String> {
        let texts: Vec<&str> = self
            .first_candidate_parts()
            .iter()
            .filter_map(Part::as_text)
            .collect();
        if texts.is_empty() {
            None
        } else {
            Some(texts.concat())
        }
    }

    /// First inline payload of the first candidate.
    pub fn first_candidate_inline_data(&self) -> Option<&InlineData> {
        self.first_candidate_parts()
            .iter()
            .find_map(Part::as_inline_data)
    }
}
