//! Free-text stages: roadmap, scripts, prompts and translation.

use crate::Pipeline;
use crate::prompts;
use lessonloom_core::{Credential, PageImage, Session, VerifiedSource};
use lessonloom_error::{LessonloomResult, StageError, StageErrorKind};
use lessonloom_interface::{GenerateContentRequest, Part};
use tracing::{debug, instrument, warn};

const ROADMAP_FALLBACK: &str = "Could not generate a roadmap.";
const TEACHER_SCRIPT_FALLBACK: &str = "Could not generate a teacher script.";
const STORYBOARD_PROMPT_FALLBACK: &str = "Could not generate a storyboard prompt.";
const VIDEO_PROMPT_FALLBACK: &str = "Could not generate a video prompt.";
const DIALOGUE_FALLBACK: &str = "Could not generate a dialogue script.";

impl Pipeline {
    /// Send a text request and return the primary text, or `fallback` when
    /// the response has none.
    async fn text_or(
        &self,
        credential: &Credential,
        request: GenerateContentRequest,
        stage: &'static str,
        fallback: &str,
    ) -> LessonloomResult<String> {
        let response = self
            .generate(credential, &self.config().models.text, &request)
            .await?;

        match response.text() {
            Some(text) => {
                debug!(stage, chars = text.len(), "Stage produced text");
                Ok(text)
            }
            None => {
                warn!(stage, "Response had no text, using fallback");
                Ok(fallback.to_string())
            }
        }
    }

    /// Plan a chapter from all of its page images plus the teacher's context.
    ///
    /// # Errors
    ///
    /// `MissingCredential`, `InvalidInput` when `pages` is empty, or remote
    /// errors once retries are exhausted.
    #[instrument(skip(self, session, context, pages), fields(pages = pages.len()))]
    pub async fn generate_roadmap(
        &self,
        session: &Session,
        context: &str,
        pages: &[PageImage],
    ) -> LessonloomResult<String> {
        let credential = session.require_credential()?;
        if pages.is_empty() {
            return Err(StageError::new(StageErrorKind::InvalidInput(
                "a roadmap needs at least one page image".to_string(),
            ))
            .into());
        }

        let mut parts: Vec<Part> = pages.iter().map(Part::image).collect();
        parts.push(Part::text(prompts::roadmap(context, pages.len())));

        self.text_or(
            &credential,
            GenerateContentRequest::from_parts(parts),
            "roadmap",
            ROADMAP_FALLBACK,
        )
        .await
    }

    /// Narration for the page, grounded in the verified source.
    #[instrument(skip_all, fields(confirmed = source.confirmed()))]
    pub async fn teacher_script(
        &self,
        session: &Session,
        source: &VerifiedSource,
    ) -> LessonloomResult<String> {
        let credential = session.require_credential()?;
        let request =
            GenerateContentRequest::from_parts(vec![Part::text(prompts::teacher_script(source))]);
        self.text_or(&credential, request, "teacher_script", TEACHER_SCRIPT_FALLBACK)
            .await
    }

    /// Image-model prompt for the page's storyboard illustration.
    #[instrument(skip_all, fields(confirmed = source.confirmed()))]
    pub async fn storyboard_prompt(
        &self,
        session: &Session,
        source: &VerifiedSource,
    ) -> LessonloomResult<String> {
        let credential = session.require_credential()?;
        let request =
            GenerateContentRequest::from_parts(vec![Part::text(prompts::storyboard_prompt(source))]);
        self.text_or(
            &credential,
            request,
            "storyboard_prompt",
            STORYBOARD_PROMPT_FALLBACK,
        )
        .await
    }

    /// Video-model prompt for the page's animated clip.
    #[instrument(skip_all, fields(confirmed = source.confirmed()))]
    pub async fn video_prompt(
        &self,
        session: &Session,
        source: &VerifiedSource,
    ) -> LessonloomResult<String> {
        let credential = session.require_credential()?;
        let request =
            GenerateContentRequest::from_parts(vec![Part::text(prompts::video_prompt(source))]);
        self.text_or(&credential, request, "video_prompt", VIDEO_PROMPT_FALLBACK)
            .await
    }

    /// Two-participant dialogue using the configured speaker labels.
    #[instrument(skip_all, fields(confirmed = source.confirmed()))]
    pub async fn dialogue_script(
        &self,
        session: &Session,
        source: &VerifiedSource,
    ) -> LessonloomResult<String> {
        let credential = session.require_credential()?;
        let (first, second) = self.dialogue_speakers()?;
        let request = GenerateContentRequest::from_parts(vec![Part::text(
            prompts::dialogue_script(source, first, second),
        )]);
        self.text_or(&credential, request, "dialogue_script", DIALOGUE_FALLBACK)
            .await
    }

    /// Concise visual English rendering of `text` for the video model.
    ///
    /// Returns `text` unchanged when the response carries no translation.
    #[instrument(skip_all, fields(chars = text.len()))]
    pub async fn translate_for_video(&self, session: &Session, text: &str) -> LessonloomResult<String> {
        let credential = session.require_credential()?;
        self.translate_with(&credential, text).await
    }

    pub(crate) async fn translate_with(
        &self,
        credential: &Credential,
        text: &str,
    ) -> LessonloomResult<String> {
        let request = GenerateContentRequest::from_parts(vec![
            Part::text(prompts::TRANSLATE_FOR_VIDEO),
            Part::text(text),
        ]);

        let response = self
            .generate(credential, &self.config().models.text, &request)
            .await?;

        match response.text().map(|t| t.trim().to_string()) {
            Some(translated) if !translated.is_empty() => Ok(translated),
            _ => {
                debug!("No translation returned, keeping original text");
                Ok(text.to_string())
            }
        }
    }

    /// The two configured dialogue speaker labels, in order.
    pub(crate) fn dialogue_speakers(&self) -> Result<(&str, &str), StageError> {
        match self.config().speech.dialogue_voices.as_slice() {
            [first, second] => Ok((first.speaker.as_str(), second.speaker.as_str())),
            other => Err(StageError::new(StageErrorKind::InvalidInput(format!(
                "dialogue needs exactly two speakers, {} configured",
                other.len()
            )))),
        }
    }
}
