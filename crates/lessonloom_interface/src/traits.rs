//! Trait definition for the remote generative service.

use crate::{GenerateContentRequest, GenerateContentResponse, VideoJob, VideoJobRequest};
use async_trait::async_trait;
use lessonloom_core::Credential;
use lessonloom_error::LessonloomResult;

/// The remote service every stage calls into.
///
/// Each call receives the credential snapshot taken at stage entry. Errors
/// are returned as structured remote errors so the retry executor can tell
/// rate limiting apart from everything else.
#[async_trait]
pub trait GenerativeService: Send + Sync {
    /// Run a single content generation request against `model`.
    async fn generate_content(
        &self,
        credential: &Credential,
        model: &str,
        request: &GenerateContentRequest,
    ) -> LessonloomResult<GenerateContentResponse>;

    /// Submit a long-running video job.
    async fn submit_video_job(
        &self,
        credential: &Credential,
        model: &str,
        request: &VideoJobRequest,
    ) -> LessonloomResult<VideoJob>;

    /// Re-fetch a job's status using its own handle.
    async fn refresh_video_job(
        &self,
        credential: &Credential,
        job: &VideoJob,
    ) -> LessonloomResult<VideoJob>;

    /// Download bytes from an already-authenticated locator.
    async fn fetch_media(&self, locator: &str) -> LessonloomResult<Vec<u8>>;

    /// Provider name (e.g. "gemini").
    fn provider_name(&self) -> &'static str;
}
