//! Generation stages for turning a scanned textbook page into lesson media.
//!
//! Every stage is a method on [`Pipeline`] and follows the same shape:
//!
//! 1. Snapshot the credential from the caller's
//!    [`Session`](lessonloom_core::Session), failing with `MissingCredential`
//!    before any I/O.
//! 2. Assemble a request from raw media, operator-verified text and a fixed
//!    instruction template.
//! 3. Run the remote call through the rate-limit
//!    [`RetryExecutor`](lessonloom_retry::RetryExecutor).
//! 4. Parse or decode the response into a value or a
//!    [`MediaBlob`](lessonloom_core::MediaBlob).
//!
//! Stages never touch `Course` or `Page` entities; storing results is the
//! caller's job.
//!
//! # Verified source
//!
//! Stages downstream of page analysis take a
//! [`VerifiedSource`](lessonloom_core::VerifiedSource) and quote its
//! `extracted_text` and `image_description` verbatim in the request, labeled
//! as the source of truth.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod analysis;
mod pipeline;
mod prompts;
mod speech;
mod storyboard;
mod text;
mod video;
mod wav;

pub use pipeline::Pipeline;
pub use video::authenticated_locator;
pub use wav::{CHANNELS, SAMPLE_RATE, pcm_to_wav};
