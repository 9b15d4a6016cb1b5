//! Structured page analysis.

use crate::Pipeline;
use crate::prompts;
use lessonloom_core::{PageAnalysis, PageImage, Session, StructuredOutcome};
use lessonloom_error::LessonloomResult;
use lessonloom_interface::{GenerateContentRequest, GenerateContentResponse, GenerationConfig, Part};
use serde_json::json;
use tracing::{debug, instrument, warn};

/// Low temperature keeps transcription literal.
const ANALYSIS_TEMPERATURE: f32 = 0.2;

/// Response schema: three required string fields.
fn analysis_schema() -> serde_json::Value {
    json!({
        "type": "OBJECT",
        "properties": {
            "analysis": { "type": "STRING" },
            "extractedText": { "type": "STRING" },
            "imageDescription": { "type": "STRING" }
        },
        "required": ["analysis", "extractedText", "imageDescription"]
    })
}

/// Read the analysis out of a response, falling back on any failure.
pub(crate) fn parse_analysis(response: &GenerateContentResponse) -> StructuredOutcome<PageAnalysis> {
    let reason = match response.text() {
        None => "response contained no text".to_string(),
        Some(body) => match serde_json::from_str::<PageAnalysis>(&body) {
            Ok(analysis) => return StructuredOutcome::Parsed(analysis),
            Err(e) => format!("invalid analysis JSON: {}", e),
        },
    };

    warn!(reason = %reason, "Page analysis unreadable, using fallback");
    StructuredOutcome::Fallback {
        value: PageAnalysis::fallback(),
        reason,
    }
}

impl Pipeline {
    /// Analyze a scanned page into teaching notes, transcribed text and a
    /// description of its visuals.
    ///
    /// Never fails on a malformed response: the documented fallback is
    /// returned as [`StructuredOutcome::Fallback`] with the reason.
    ///
    /// # Errors
    ///
    /// `MissingCredential` before any call; remote errors once retries are
    /// exhausted.
    #[instrument(skip(self, session, image), fields(mime_type = %image.mime_type()))]
    pub async fn analyze_page(
        &self,
        session: &Session,
        image: &PageImage,
    ) -> LessonloomResult<StructuredOutcome<PageAnalysis>> {
        let credential = session.require_credential()?;

        let request =
            GenerateContentRequest::from_parts(vec![Part::image(image), Part::text(prompts::ANALYZE_PAGE)])
                .with_config(GenerationConfig {
                    temperature: Some(ANALYSIS_TEMPERATURE),
                    response_mime_type: Some("application/json".to_string()),
                    response_schema: Some(analysis_schema()),
                    ..Default::default()
                });

        let response = self
            .generate(&credential, &self.config().models.text, &request)
            .await?;

        let outcome = parse_analysis(&response);
        debug!(fallback = outcome.is_fallback(), "Page analysis complete");
        Ok(outcome)
    }
}
