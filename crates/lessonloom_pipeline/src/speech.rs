//! Single- and multi-speaker speech synthesis.

use crate::{Pipeline, SAMPLE_RATE, pcm_to_wav};
use crate::prompts;
use lessonloom_core::{MediaBlob, Session};
use lessonloom_error::{LessonloomResult, StageError, StageErrorKind};
use lessonloom_interface::{
    GenerateContentRequest, GenerateContentResponse, GenerationConfig, Part, ResponseModality,
    SpeechConfig,
};
use tracing::{debug, instrument};

impl Pipeline {
    /// Speak `text` in one voice, returning a 24 kHz mono WAV blob.
    ///
    /// A missing or blank `voice` falls back to the configured default voice.
    ///
    /// # Errors
    ///
    /// `MissingCredential`, remote errors, `MissingMediaPayload` when the
    /// response carries no audio, or `Base64Decode`.
    #[instrument(skip(self, session, text), fields(chars = text.len()))]
    pub async fn synthesize_speech(
        &self,
        session: &Session,
        text: &str,
        voice: Option<&str>,
    ) -> LessonloomResult<MediaBlob> {
        let credential = session.require_credential()?;
        let voice = voice
            .filter(|name| !name.trim().is_empty())
            .unwrap_or(self.config().speech.default_voice.as_str());

        let request = GenerateContentRequest::from_parts(vec![Part::text(text)]).with_config(
            GenerationConfig {
                response_modalities: Some(vec![ResponseModality::Audio]),
                speech_config: Some(SpeechConfig::single(voice)),
                ..Default::default()
            },
        );

        let response = self
            .generate(&credential, &self.config().models.speech, &request)
            .await?;
        self.wav_from_response(&response, "speech")
    }

    /// Speak a two-participant script with the configured speaker voices.
    ///
    /// The speaker-to-voice mapping is fixed by configuration, not read from
    /// the script.
    #[instrument(skip(self, session, script), fields(chars = script.len()))]
    pub async fn synthesize_dialogue(
        &self,
        session: &Session,
        script: &str,
    ) -> LessonloomResult<MediaBlob> {
        let credential = session.require_credential()?;
        let voices = &self.config().speech.dialogue_voices;

        let request = GenerateContentRequest::from_parts(vec![Part::text(format!(
            "{}\n{}",
            prompts::DIALOGUE_SPEECH,
            script
        ))])
        .with_config(GenerationConfig {
            response_modalities: Some(vec![ResponseModality::Audio]),
            speech_config: Some(SpeechConfig::multi_speaker(
                voices.iter().map(|v| (v.speaker.as_str(), v.voice.as_str())),
            )),
            ..Default::default()
        });

        let response = self
            .generate(&credential, &self.config().models.speech, &request)
            .await?;
        self.wav_from_response(&response, "dialogue_speech")
    }

    /// Decode the first candidate's inline PCM and wrap it as WAV.
    fn wav_from_response(
        &self,
        response: &GenerateContentResponse,
        stage: &str,
    ) -> LessonloomResult<MediaBlob> {
        let inline = response
            .first_candidate_inline_data()
            .ok_or_else(|| StageError::new(StageErrorKind::MissingMediaPayload(stage.to_string())))?;

        let pcm = inline
            .decode()
            .map_err(|e| StageError::new(StageErrorKind::Base64Decode(format!("{}", e))))?;

        let wav = pcm_to_wav(&pcm, SAMPLE_RATE)?;
        debug!(stage, pcm_bytes = pcm.len(), wav_bytes = wav.len(), "Speech encoded");
        Ok(MediaBlob::wav(wav))
    }
}
