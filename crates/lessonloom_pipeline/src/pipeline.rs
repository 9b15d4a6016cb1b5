//! The stage runner shared by every stage.

use lessonloom_core::Credential;
use lessonloom_error::LessonloomResult;
use lessonloom_interface::{GenerateContentRequest, GenerateContentResponse, GenerativeService};
use lessonloom_retry::{LessonloomConfig, RetryExecutor};
use std::sync::Arc;
use tracing::debug;

/// Runs generation stages against a remote service.
///
/// Cloning is cheap and clones share the service and throttle. Stages may be
/// invoked concurrently; nothing is serialized between them.
///
/// # Example
///
/// ```rust,ignore
/// let pipeline = Pipeline::new(Arc::new(GeminiRestClient::new()), LessonloomConfig::load()?);
/// let session = Session::signed_in(api_key);
/// let outcome = pipeline.analyze_page(&session, &image).await?;
/// ```
#[derive(Clone)]
pub struct Pipeline {
    service: Arc<dyn GenerativeService>,
    config: LessonloomConfig,
    executor: RetryExecutor,
}

impl std::fmt::Debug for Pipeline {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Pipeline")
            .field("provider", &self.service.provider_name())
            .field("config", &self.config)
            .field("executor", &self.executor)
            .finish()
    }
}

impl Pipeline {
    /// A pipeline using `config` for models, retries, polling and voices.
    pub fn new(service: Arc<dyn GenerativeService>, config: LessonloomConfig) -> Self {
        let executor = config.executor();
        Self {
            service,
            config,
            executor,
        }
    }

    /// Replace the retry executor (e.g. to share one throttle across pipelines).
    pub fn with_executor(mut self, executor: RetryExecutor) -> Self {
        self.executor = executor;
        self
    }

    /// The active configuration.
    pub fn config(&self) -> &LessonloomConfig {
        &self.config
    }

    pub(crate) fn service(&self) -> &dyn GenerativeService {
        self.service.as_ref()
    }

    pub(crate) fn executor(&self) -> &RetryExecutor {
        &self.executor
    }

    /// One `generateContent` call under the retry executor.
    pub(crate) async fn generate(
        &self,
        credential: &Credential,
        model: &str,
        request: &GenerateContentRequest,
    ) -> LessonloomResult<GenerateContentResponse> {
        debug!(model, prompt_len = request.text().len(), "Dispatching content request");
        self.executor
            .execute(|| self.service.generate_content(credential, model, request))
            .await
    }
}
