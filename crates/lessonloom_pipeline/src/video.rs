//! Video generation: submit, poll to completion, download.

use crate::Pipeline;
use lessonloom_core::{AspectRatio, Credential, MediaBlob, PageImage, Session, VideoResolution};
use lessonloom_error::{LessonloomResult, StageError, StageErrorKind};
use lessonloom_interface::{VideoJob, VideoJobRequest};
use tracing::{debug, info, instrument};
use url::Url;

/// Query parameter carrying the API key on download locators.
const KEY_PARAM: &str = "key";

/// Append the credential to a result locator as the `key` query parameter.
///
/// Any existing query is kept.
///
/// # Examples
///
/// ```
/// use lessonloom_core::Credential;
/// use lessonloom_pipeline::authenticated_locator;
///
/// let url = authenticated_locator(
///     "https://files.example/v1/clip:download?alt=media",
///     &Credential::new("abc"),
/// )
/// .unwrap();
/// assert_eq!(url, "https://files.example/v1/clip:download?alt=media&key=abc");
/// ```
pub fn authenticated_locator(uri: &str, credential: &Credential) -> Result<String, StageError> {
    let mut url = Url::parse(uri).map_err(|e| {
        StageError::new(StageErrorKind::VideoFailed(format!(
            "invalid result locator: {}",
            e
        )))
    })?;
    url.query_pairs_mut()
        .append_pair(KEY_PARAM, credential.expose());
    Ok(url.into())
}

/// The locator with its query removed, for logs.
fn without_query(locator: &str) -> String {
    match Url::parse(locator) {
        Ok(mut url) => {
            url.set_query(None);
            url.into()
        }
        Err(_) => "<unparseable locator>".to_string(),
    }
}

impl Pipeline {
    /// Turn a video prompt and the page image into a short clip.
    ///
    /// The prompt is first translated to visual English. Submission and
    /// polling run under the video retry budget as one unit; the final
    /// download is not retried. The client-side throttle applies to each
    /// remote call on its own, so other stages proceed while a job is polled.
    ///
    /// # Errors
    ///
    /// - `MissingCredential` before any call
    /// - `PollTimeout` when the job is still pending after the configured cap
    /// - `VideoFailed` when the finished job has no result locator
    /// - remote errors from any call
    #[instrument(skip(self, session, prompt, image))]
    pub async fn generate_video(
        &self,
        session: &Session,
        prompt: &str,
        image: &PageImage,
        resolution: VideoResolution,
        aspect_ratio: AspectRatio,
    ) -> LessonloomResult<MediaBlob> {
        let credential = session.require_credential()?;

        let translated = self.translate_with(&credential, prompt).await?;
        let request = VideoJobRequest::single(translated, image, resolution, aspect_ratio);

        let job = self
            .executor()
            .with_policy(self.config().retry.video_policy())
            .unthrottled()
            .execute(|| self.submit_and_poll(&credential, &request))
            .await?;

        let uri = job.result_uri().ok_or_else(|| {
            StageError::new(StageErrorKind::VideoFailed(
                job.error
                    .clone()
                    .unwrap_or_else(|| "job finished without a result locator".to_string()),
            ))
        })?;

        let locator = authenticated_locator(uri, &credential)?;
        info!(url = %without_query(&locator), "Downloading generated video");
        let bytes = self
            .executor()
            .throttled(self.service().fetch_media(&locator))
            .await?;

        let mime_type = job
            .videos
            .first()
            .and_then(|video| video.mime_type.clone())
            .unwrap_or_else(|| "video/mp4".to_string());
        Ok(MediaBlob::video(mime_type, bytes))
    }

    async fn submit_and_poll(
        &self,
        credential: &Credential,
        request: &VideoJobRequest,
    ) -> LessonloomResult<VideoJob> {
        let job = self
            .executor()
            .throttled(
                self.service()
                    .submit_video_job(credential, &self.config().models.video, request),
            )
            .await?;
        info!(job = %job.name, "Video job submitted");
        self.poll_until_done(credential, job).await
    }

    /// Wait out the poll interval and refresh through the job's own handle
    /// until it reports done.
    async fn poll_until_done(&self, credential: &Credential, mut job: VideoJob) -> LessonloomResult<VideoJob> {
        let interval = self.config().poller.interval();
        let cap = self.config().poller.poll_cap();
        let mut polls: u32 = 0;

        while !job.done {
            if cap.is_some_and(|max| polls >= max) {
                return Err(StageError::new(StageErrorKind::PollTimeout { attempts: polls }).into());
            }

            tokio::time::sleep(interval).await;
            job = self
                .executor()
                .throttled(self.service().refresh_video_job(credential, &job))
                .await?;
            polls += 1;
            debug!(polls, done = job.done, "Video job status refreshed");
        }

        info!(job = %job.name, polls, "Video job finished");
        Ok(job)
    }
}
