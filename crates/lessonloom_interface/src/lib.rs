//! Interface to the remote generative content service.
//!
//! The pipeline talks to the service only through [`GenerativeService`], so
//! the HTTP client and test doubles are interchangeable. Request and response
//! types mirror the service's content model: an ordered list of [`Part`]s,
//! each either text or base64 inline media, plus optional
//! [`GenerationConfig`].

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod content;
mod traits;
mod video;

pub use content::{
    Candidate, Content, GenerateContentRequest, GenerateContentResponse, GenerationConfig,
    InlineData, InlineDataPart, MultiSpeakerVoiceConfig, Part, PrebuiltVoiceConfig,
    ResponseModality, SpeakerVoiceConfig, SpeechConfig, TextPart, VoiceConfig,
};
pub use traits::GenerativeService;
pub use video::{GeneratedVideo, VideoJob, VideoJobRequest};
