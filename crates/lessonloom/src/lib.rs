//! Lessonloom - verified lesson media from scanned textbook pages
//!
//! Lessonloom drives a remote generative model through a chain of stages
//! that turn one scanned page into a full set of lesson artifacts:
//!
//! - **Page analysis**: teaching notes, transcribed text and a description of
//!   the page's visuals, returned as structured data
//! - **Roadmap**: a chapter plan built from every page image
//! - **Teacher script** and single-voice narration
//! - **Storyboard** prompt and illustration
//! - **Video** prompt and a short animated clip
//! - **Dialogue** script and two-voice audio
//!
//! Once an operator confirms a page's transcribed text and image
//! description, every later stage quotes them verbatim as the source of
//! truth.
//!
//! # Quick Start
//!
//! ```rust,ignore
//! use lessonloom::{GeminiRestClient, LessonloomConfig, PageImage, Pipeline, Session};
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = LessonloomConfig::load()?;
//!     let client = GeminiRestClient::with_base_url(&config.api.base_url);
//!     let pipeline = Pipeline::new(Arc::new(client), config);
//!     let session = Session::signed_in(std::env::var("GEMINI_API_KEY")?);
//!
//!     let image = PageImage::new("image/jpeg", std::fs::read("page-12.jpg")?);
//!     let analysis = pipeline.analyze_page(&session, &image).await?;
//!     println!("{}", analysis.value().extracted_text);
//!     Ok(())
//! }
//! ```
//!
//! # Architecture
//!
//! - `lessonloom_error` - Error types and categories
//! - `lessonloom_core` - Course, page, session and media types
//! - `lessonloom_interface` - `GenerativeService` trait and wire types
//! - `lessonloom_retry` - Rate-limit retry, throttling and configuration
//! - `lessonloom_gemini` - Gemini REST client
//! - `lessonloom_pipeline` - The generation stages
//!
//! This crate (`lessonloom`) re-exports everything for convenience.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod observability;

pub use lessonloom_core::{
    AspectRatio, AssetId, Course, Credential, MediaBlob, MediaKind, Page, PageAnalysis,
    PageImage, Session, StructuredOutcome, VerifiedSource, VideoResolution,
};
pub use lessonloom_error::{
    ConfigError, ErrorCategory, LessonloomError, LessonloomErrorKind, LessonloomResult,
    RemoteError, RemoteErrorKind, RetryableError, StageError, StageErrorKind,
};
pub use lessonloom_gemini::{DEFAULT_BASE_URL, GeminiRestClient};
pub use lessonloom_interface::{
    GenerateContentRequest, GenerateContentResponse, GenerationConfig, GenerativeService,
    InlineData, Part, ResponseModality, SpeechConfig, VideoJob, VideoJobRequest,
};
pub use lessonloom_pipeline::{Pipeline, SAMPLE_RATE, authenticated_locator, pcm_to_wav};
pub use lessonloom_retry::{
    LessonloomConfig, RateLimiter, RetryExecutor, RetryPolicy, SpeakerVoice,
};
