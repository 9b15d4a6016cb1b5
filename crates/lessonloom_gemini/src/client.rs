//! reqwest implementation of the generative service.

use crate::protocol::{ErrorEnvelope, Operation, PredictLongRunningRequest};
use async_trait::async_trait;
use lessonloom_core::Credential;
use lessonloom_error::{LessonloomResult, RemoteError, RemoteErrorKind};
use lessonloom_interface::{
    GenerateContentRequest, GenerateContentResponse, GenerativeService, VideoJob, VideoJobRequest,
};
use reqwest::{Client, RequestBuilder, Response};
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::{debug, error, info, instrument};

/// Generative Language API endpoint.
pub const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";

/// Header carrying the API key on authenticated calls.
const API_KEY_HEADER: &str = "x-goog-api-key";

/// Gemini REST client.
///
/// Holds no credential; every call receives the session's credential
/// snapshot from the stage that issued it.
///
/// # Example
///
/// ```rust,ignore
/// let client = GeminiRestClient::new();
/// let response = client
///     .generate_content(&credential, "gemini-2.5-flash", &request)
///     .await?;
/// ```
#[derive(Debug, Clone)]
pub struct GeminiRestClient {
    client: Client,
    base_url: String,
}

impl Default for GeminiRestClient {
    fn default() -> Self {
        Self::new()
    }
}

impl GeminiRestClient {
    /// Client for the public endpoint.
    pub fn new() -> Self {
        Self::with_base_url(DEFAULT_BASE_URL)
    }

    /// Client for a different endpoint (a proxy, or a mock server in tests).
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        debug!(base_url = %base_url, "Creating Gemini REST client");
        Self {
            client: Client::new(),
            base_url,
        }
    }

    /// The endpoint this client talks to.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn model_url(&self, model: &str, method: &str) -> String {
        let model = model.strip_prefix("models/").unwrap_or(model);
        format!("{}/models/{}:{}", self.base_url, model, method)
    }

    fn authorized(&self, builder: RequestBuilder, credential: &Credential) -> RequestBuilder {
        builder.header(API_KEY_HEADER, credential.expose())
    }

    async fn post_json<B, R>(&self, credential: &Credential, url: &str, body: &B) -> LessonloomResult<R>
    where
        B: Serialize + ?Sized,
        R: DeserializeOwned,
    {
        let response = self
            .authorized(self.client.post(url), credential)
            .json(body)
            .send()
            .await
            .map_err(transport_error)?;

        decode_json(response).await
    }

    async fn get_json<R>(&self, credential: &Credential, url: &str) -> LessonloomResult<R>
    where
        R: DeserializeOwned,
    {
        let response = self
            .authorized(self.client.get(url), credential)
            .send()
            .await
            .map_err(transport_error)?;

        decode_json(response).await
    }
}

#[async_trait]
impl GenerativeService for GeminiRestClient {
    #[instrument(skip(self, credential, request), fields(parts = request.contents.iter().map(|c| c.parts.len()).sum::<usize>()))]
    async fn generate_content(
        &self,
        credential: &Credential,
        model: &str,
        request: &GenerateContentRequest,
    ) -> LessonloomResult<GenerateContentResponse> {
        let url = self.model_url(model, "generateContent");
        debug!(url = %url, "Sending generateContent request");

        let response: GenerateContentResponse = self.post_json(credential, &url, request).await?;

        debug!(
            candidates = response.candidates.len(),
            "Received generateContent response"
        );
        Ok(response)
    }

    #[instrument(skip(self, credential, request), fields(resolution = %request.resolution))]
    async fn submit_video_job(
        &self,
        credential: &Credential,
        model: &str,
        request: &VideoJobRequest,
    ) -> LessonloomResult<VideoJob> {
        let url = self.model_url(model, "predictLongRunning");
        let body = PredictLongRunningRequest::from(request);

        let operation: Operation = self.post_json(credential, &url, &body).await?;
        info!(operation = %operation.name, "Video job submitted");

        Ok(operation.into())
    }

    #[instrument(skip(self, credential, job), fields(operation = %job.name))]
    async fn refresh_video_job(
        &self,
        credential: &Credential,
        job: &VideoJob,
    ) -> LessonloomResult<VideoJob> {
        let url = format!("{}/{}", self.base_url, job.name.trim_start_matches('/'));

        let operation: Operation = self.get_json(credential, &url).await?;
        debug!(done = operation.done, "Video job status refreshed");

        Ok(operation.into())
    }

    #[instrument(skip_all)]
    async fn fetch_media(&self, locator: &str) -> LessonloomResult<Vec<u8>> {
        let response = self
            .client
            .get(locator)
            .send()
            .await
            .map_err(transport_error)?;

        if !response.status().is_success() {
            return Err(http_error(response).await.into());
        }

        let bytes = response.bytes().await.map_err(transport_error)?;
        debug!(bytes = bytes.len(), "Downloaded media");
        Ok(bytes.to_vec())
    }

    fn provider_name(&self) -> &'static str {
        "gemini"
    }
}

#[track_caller]
fn transport_error(e: reqwest::Error) -> RemoteError {
    error!(error = ?e, "Request to Gemini API failed");
    RemoteError::new(RemoteErrorKind::Transport(format!("{}", e)))
}

/// Decode a success body, or turn a failure status into an error.
async fn decode_json<R: DeserializeOwned>(response: Response) -> LessonloomResult<R> {
    if !response.status().is_success() {
        return Err(http_error(response).await.into());
    }

    let body = response.text().await.map_err(transport_error)?;
    serde_json::from_str(&body).map_err(|e| {
        error!(error = %e, "Failed to parse Gemini response");
        RemoteError::new(RemoteErrorKind::Decode(format!(
            "Failed to parse response: {}",
            e
        )))
        .into()
    })
}

/// Build an HTTP error from a non-success response, reading the RPC status
/// from the JSON error body when there is one.
async fn http_error(response: Response) -> RemoteError {
    let status_code = response.status().as_u16();
    let body = response.text().await.unwrap_or_default();

    let (status, message) = match serde_json::from_str::<ErrorEnvelope>(&body) {
        Ok(envelope) => (envelope.error.status, envelope.error.message),
        Err(_) => (None, body),
    };

    error!(status_code, status = ?status, message = %message, "Gemini API returned error");
    RemoteError::new(RemoteErrorKind::Http {
        status_code,
        status,
        message,
    })
}
