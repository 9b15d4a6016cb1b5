//! Scripted generative service for testing.

use async_trait::async_trait;
use lessonloom_core::Credential;
use lessonloom_error::{LessonloomError, LessonloomResult, RemoteError, RemoteErrorKind};
use lessonloom_interface::{
    GenerateContentRequest, GenerateContentResponse, GenerativeService, Part, VideoJob,
    VideoJobRequest,
};
use std::collections::VecDeque;
use std::sync::Mutex;

/// A single scripted reply to `generate_content`.
#[derive(Debug, Clone)]
pub enum MockReply {
    /// Return this response
    Content(GenerateContentResponse),
    /// Fail with HTTP 429 / RESOURCE_EXHAUSTED
    RateLimited,
    /// Fail with HTTP 500
    ServerError,
}

/// A single scripted reply to `submit_video_job` or `refresh_video_job`.
#[derive(Debug, Clone)]
pub enum MockJobReply {
    /// Return this job state
    Job(VideoJob),
    /// Fail with HTTP 429 / RESOURCE_EXHAUSTED
    RateLimited,
}

/// One recorded call.
#[derive(Debug, Clone)]
pub enum MockCall {
    GenerateContent {
        credential: String,
        model: String,
        request: GenerateContentRequest,
    },
    SubmitVideoJob {
        model: String,
        request: VideoJobRequest,
    },
    RefreshVideoJob {
        name: String,
    },
    FetchMedia {
        locator: String,
    },
}

/// Mock generative service.
///
/// Replies are consumed in order; a call past the end of its script fails
/// with a server error so tests notice unexpected calls.
#[derive(Debug, Default)]
pub struct MockService {
    content: Mutex<VecDeque<MockReply>>,
    jobs: Mutex<VecDeque<MockJobReply>>,
    media: Mutex<Vec<u8>>,
    calls: Mutex<Vec<MockCall>>,
}

impl MockService {
    /// An empty script.
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a content reply.
    pub fn with_reply(self, reply: MockReply) -> Self {
        self.content.lock().unwrap().push_back(reply);
        self
    }

    /// Queue a text response.
    pub fn with_text(self, text: impl Into<String>) -> Self {
        self.with_reply(MockReply::Content(GenerateContentResponse::from_text(text)))
    }

    /// Queue a response carrying one inline payload.
    pub fn with_inline(self, mime_type: &str, bytes: &[u8]) -> Self {
        self.with_reply(MockReply::Content(GenerateContentResponse::from_parts(vec![
            Part::inline(mime_type, bytes),
        ])))
    }

    /// Queue a response with no candidates.
    pub fn with_empty_response(self) -> Self {
        self.with_reply(MockReply::Content(GenerateContentResponse::default()))
    }

    /// Queue job states: the first answers the submit, the rest answer refreshes.
    pub fn with_jobs(self, jobs: impl IntoIterator<Item = MockJobReply>) -> Self {
        self.jobs.lock().unwrap().extend(jobs);
        self
    }

    /// Bytes returned by every media download.
    pub fn with_media(self, bytes: Vec<u8>) -> Self {
        *self.media.lock().unwrap() = bytes;
        self
    }

    /// Every call, in order.
    pub fn calls(&self) -> Vec<MockCall> {
        self.calls.lock().unwrap().clone()
    }

    /// Total number of calls of any kind.
    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }

    /// Requests passed to `generate_content`, in order.
    pub fn content_requests(&self) -> Vec<GenerateContentRequest> {
        self.calls()
            .into_iter()
            .filter_map(|call| match call {
                MockCall::GenerateContent { request, .. } => Some(request),
                _ => None,
            })
            .collect()
    }

    /// Models passed to `generate_content`, in order.
    pub fn content_models(&self) -> Vec<String> {
        self.calls()
            .into_iter()
            .filter_map(|call| match call {
                MockCall::GenerateContent { model, .. } => Some(model),
                _ => None,
            })
            .collect()
    }

    /// Number of `submit_video_job` calls.
    pub fn submit_count(&self) -> usize {
        self.calls()
            .iter()
            .filter(|call| matches!(call, MockCall::SubmitVideoJob { .. }))
            .count()
    }

    /// Job names passed to `refresh_video_job`, in order.
    pub fn refreshed_jobs(&self) -> Vec<String> {
        self.calls()
            .into_iter()
            .filter_map(|call| match call {
                MockCall::RefreshVideoJob { name } => Some(name),
                _ => None,
            })
            .collect()
    }

    /// Locators passed to `fetch_media`, in order.
    pub fn fetched_locators(&self) -> Vec<String> {
        self.calls()
            .into_iter()
            .filter_map(|call| match call {
                MockCall::FetchMedia { locator } => Some(locator),
                _ => None,
            })
            .collect()
    }

    fn record(&self, call: MockCall) {
        self.calls.lock().unwrap().push(call);
    }

    fn next_job(&self) -> LessonloomResult<VideoJob> {
        match self.jobs.lock().unwrap().pop_front() {
            Some(MockJobReply::Job(job)) => Ok(job),
            Some(MockJobReply::RateLimited) => Err(rate_limited()),
            None => Err(exhausted("job")),
        }
    }
}

fn rate_limited() -> LessonloomError {
    RemoteError::new(RemoteErrorKind::Http {
        status_code: 429,
        status: Some("RESOURCE_EXHAUSTED".to_string()),
        message: "Resource has been exhausted".to_string(),
    })
    .into()
}

fn server_error(message: &str) -> LessonloomError {
    RemoteError::new(RemoteErrorKind::Http {
        status_code: 500,
        status: Some("INTERNAL".to_string()),
        message: message.to_string(),
    })
    .into()
}

fn exhausted(what: &str) -> LessonloomError {
    server_error(&format!("Mock {} script exhausted", what))
}

#[async_trait]
impl GenerativeService for MockService {
    async fn generate_content(
        &self,
        credential: &Credential,
        model: &str,
        request: &GenerateContentRequest,
    ) -> LessonloomResult<GenerateContentResponse> {
        self.record(MockCall::GenerateContent {
            credential: credential.expose().to_string(),
            model: model.to_string(),
            request: request.clone(),
        });

        match self.content.lock().unwrap().pop_front() {
            Some(MockReply::Content(response)) => Ok(response),
            Some(MockReply::RateLimited) => Err(rate_limited()),
            Some(MockReply::ServerError) => Err(server_error("Internal error")),
            None => Err(exhausted("content")),
        }
    }

    async fn submit_video_job(
        &self,
        _credential: &Credential,
        model: &str,
        request: &VideoJobRequest,
    ) -> LessonloomResult<VideoJob> {
        self.record(MockCall::SubmitVideoJob {
            model: model.to_string(),
            request: request.clone(),
        });
        self.next_job()
    }

    async fn refresh_video_job(
        &self,
        _credential: &Credential,
        job: &VideoJob,
    ) -> LessonloomResult<VideoJob> {
        self.record(MockCall::RefreshVideoJob {
            name: job.name.clone(),
        });
        self.next_job()
    }

    async fn fetch_media(&self, locator: &str) -> LessonloomResult<Vec<u8>> {
        self.record(MockCall::FetchMedia {
            locator: locator.to_string(),
        });
        Ok(self.media.lock().unwrap().clone())
    }

    fn provider_name(&self) -> &'static str {
        "mock"
    }
}
