//! Gemini REST client for Lessonloom.
//!
//! [`GeminiRestClient`] implements [`GenerativeService`](lessonloom_interface::GenerativeService)
//! against the Generative Language REST API:
//!
//! - `POST {base}/models/{model}:generateContent` for text, structured JSON,
//!   image and speech output
//! - `POST {base}/models/{model}:predictLongRunning` to submit a video job
//! - `GET {base}/{operation}` to refresh a video job
//! - plain `GET` on an authenticated locator to download a finished clip
//!
//! Failures are reported as [`RemoteError`](lessonloom_error::RemoteError)s
//! carrying the HTTP status and the RPC status from the error body, so the
//! retry executor can classify rate limiting without inspecting messages.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod client;
mod protocol;

pub use client::{DEFAULT_BASE_URL, GeminiRestClient};
