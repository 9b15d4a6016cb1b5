//! Storyboard illustration.

use crate::Pipeline;
use crate::prompts;
use lessonloom_core::{MediaBlob, PageImage, Session};
use lessonloom_error::{LessonloomResult, StageError, StageErrorKind};
use lessonloom_interface::{GenerateContentRequest, GenerationConfig, Part, ResponseModality};
use tracing::{debug, instrument};

impl Pipeline {
    /// Render a storyboard image from `prompt`, optionally anchored to the
    /// page image.
    ///
    /// The first inline part of the response is the image.
    ///
    /// # Errors
    ///
    /// `MissingCredential`, remote errors, `MissingMediaPayload` when the
    /// response carries no image, or `Base64Decode`.
    #[instrument(skip(self, session, prompt, reference), fields(with_reference = reference.is_some()))]
    pub async fn storyboard_image(
        &self,
        session: &Session,
        prompt: &str,
        reference: Option<&PageImage>,
    ) -> LessonloomResult<MediaBlob> {
        let credential = session.require_credential()?;

        let mut parts = Vec::with_capacity(2);
        if let Some(image) = reference {
            parts.push(Part::image(image));
        }
        parts.push(Part::text(prompts::storyboard_image(prompt, reference.is_some())));

        let request = GenerateContentRequest::from_parts(parts).with_config(GenerationConfig {
            response_modalities: Some(vec![ResponseModality::Text, ResponseModality::Image]),
            ..Default::default()
        });

        let response = self
            .generate(&credential, &self.config().models.image, &request)
            .await?;

        let inline = response.first_candidate_inline_data().ok_or_else(|| {
            StageError::new(StageErrorKind::MissingMediaPayload(
                "storyboard_image".to_string(),
            ))
        })?;

        let bytes = inline
            .decode()
            .map_err(|e| StageError::new(StageErrorKind::Base64Decode(format!("{}", e))))?;

        debug!(mime_type = %inline.mime_type, bytes = bytes.len(), "Storyboard image received");
        Ok(MediaBlob::image(inline.mime_type.clone(), bytes))
    }
}
