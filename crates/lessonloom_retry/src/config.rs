//! Layered TOML configuration.
//!
//! Sources, later overriding earlier:
//! 1. Bundled defaults (`lessonloom.toml`, embedded at compile time)
//! 2. `~/.config/lessonloom/lessonloom.toml`
//! 3. `./lessonloom.toml`
//!
//! The API credential is deliberately not configurable here; it lives in a
//! [`Session`](https://docs.rs/lessonloom_core) owned by the caller.

use crate::{RateLimiter, RetryExecutor, RetryPolicy};
use config::{Config, File, FileFormat};
use lessonloom_error::{ConfigError, LessonloomError, LessonloomResult};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::time::Duration;
use tracing::{debug, instrument};

/// Bundled default configuration.
const DEFAULT_CONFIG: &str = include_str!("../../../lessonloom.toml");

/// Retry budgets.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct RetrySettings {
    /// Extra attempts after a rate-limited call
    pub retries: u32,
    /// First backoff in milliseconds; doubles per retry
    pub base_delay_ms: u64,
    /// Retry budget for the whole video submit-and-poll sequence
    pub video_retries: u32,
}

impl Default for RetrySettings {
    fn default() -> Self {
        Self {
            retries: 3,
            base_delay_ms: 2000,
            video_retries: 1,
        }
    }
}

impl RetrySettings {
    /// Policy for ordinary stages.
    pub fn policy(&self) -> RetryPolicy {
        RetryPolicy::new(self.retries, Duration::from_millis(self.base_delay_ms))
    }

    /// Policy for the video stage.
    pub fn video_policy(&self) -> RetryPolicy {
        self.policy().with_retries(self.video_retries)
    }
}

/// Video job polling.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct PollerSettings {
    /// Wait between status checks in milliseconds
    pub interval_ms: u64,
    /// Maximum status checks before `PollTimeout`; 0 means no cap
    pub max_polls: u32,
}

impl Default for PollerSettings {
    fn default() -> Self {
        Self {
            interval_ms: 5000,
            max_polls: 120,
        }
    }
}

impl PollerSettings {
    /// Wait between status checks.
    pub fn interval(&self) -> Duration {
        Duration::from_millis(self.interval_ms)
    }

    /// The cap, or `None` when unbounded.
    pub fn poll_cap(&self) -> Option<u32> {
        (self.max_polls > 0).then_some(self.max_polls)
    }
}

/// Optional client-side throttle.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct ThrottleSettings {
    /// Requests per minute
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rpm: Option<u32>,
    /// Concurrent in-flight requests
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_concurrent: Option<u32>,
}

impl ThrottleSettings {
    /// A limiter if any dimension is set.
    pub fn limiter(&self) -> Option<RateLimiter> {
        if self.rpm.is_none() && self.max_concurrent.is_none() {
            None
        } else {
            Some(RateLimiter::new(self.rpm, self.max_concurrent))
        }
    }
}

/// Model identifiers per artifact type.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct ModelSettings {
    /// Analysis, roadmap, scripts, prompts and translation
    pub text: String,
    /// Single- and multi-speaker speech
    pub speech: String,
    /// Storyboard image
    pub image: String,
    /// Video clip
    pub video: String,
}

impl Default for ModelSettings {
    fn default() -> Self {
        Self {
            text: "gemini-2.5-flash".to_string(),
            speech: "gemini-2.5-flash-preview-tts".to_string(),
            image: "gemini-2.5-flash-image".to_string(),
            video: "veo-3.1-fast-generate-preview".to_string(),
        }
    }
}

/// Remote endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct ApiSettings {
    /// Base URL, without trailing slash
    pub base_url: String,
}

impl Default for ApiSettings {
    fn default() -> Self {
        Self {
            base_url: "https://generativelanguage.googleapis.com/v1beta".to_string(),
        }
    }
}

/// One dialogue speaker and its voice.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Deserialize, Serialize)]
pub struct SpeakerVoice {
    /// Label used in the dialogue script
    pub speaker: String,
    /// Prebuilt voice name
    pub voice: String,
}

impl SpeakerVoice {
    fn new(speaker: &str, voice: &str) -> Self {
        Self {
            speaker: speaker.to_string(),
            voice: voice.to_string(),
        }
    }
}

/// Speech synthesis settings.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct SpeechSettings {
    /// Voice when a page does not name one
    pub default_voice: String,
    /// Exactly two speakers with distinct voices
    pub dialogue_voices: Vec<SpeakerVoice>,
}

impl Default for SpeechSettings {
    fn default() -> Self {
        Self {
            default_voice: "Kore".to_string(),
            dialogue_voices: vec![
                SpeakerVoice::new("Teacher", "Kore"),
                SpeakerVoice::new("Student", "Puck"),
            ],
        }
    }
}

/// Top-level Lessonloom configuration.
///
/// # Example
///
/// ```no_run
/// use lessonloom_retry::LessonloomConfig;
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let config = LessonloomConfig::load()?;
/// println!("text model: {}", config.models.text);
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct LessonloomConfig {
    /// Retry budgets
    pub retry: RetrySettings,
    /// Video job polling
    pub poller: PollerSettings,
    /// Client-side throttle
    pub throttle: ThrottleSettings,
    /// Model identifiers
    pub models: ModelSettings,
    /// Remote endpoint
    pub api: ApiSettings,
    /// Speech synthesis
    pub speech: SpeechSettings,
}

impl LessonloomConfig {
    /// Load configuration from a specific file path.
    ///
    /// Values missing from the file take their built-in defaults.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, parsed or validated.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn from_file(path: impl AsRef<std::path::Path>) -> LessonloomResult<Self> {
        debug!("Loading configuration from file");

        let config: Self = Config::builder()
            .add_source(File::from(path.as_ref()))
            .build()
            .map_err(|e| {
                LessonloomError::from(ConfigError::new(format!(
                    "Failed to read configuration from {}: {}",
                    path.as_ref().display(),
                    e
                )))
            })?
            .try_deserialize()
            .map_err(|e| {
                LessonloomError::from(ConfigError::new(format!(
                    "Failed to parse configuration: {}",
                    e
                )))
            })?;

        config.validate()?;
        Ok(config)
    }

    /// Load configuration with precedence: current dir > home dir > bundled defaults.
    ///
    /// User config files are optional and silently skipped if absent.
    #[instrument]
    pub fn load() -> LessonloomResult<Self> {
        debug!("Loading configuration with precedence: current dir > home dir > bundled defaults");

        let mut builder =
            Config::builder().add_source(File::from_str(DEFAULT_CONFIG, FileFormat::Toml));

        if let Some(home) = dirs::home_dir() {
            let home_config = home.join(".config/lessonloom/lessonloom.toml");
            builder = builder.add_source(File::from(home_config).required(false));
        }

        builder = builder.add_source(File::with_name("lessonloom").required(false));

        let config: Self = builder
            .build()
            .map_err(|e| {
                LessonloomError::from(ConfigError::new(format!(
                    "Failed to build configuration: {}",
                    e
                )))
            })?
            .try_deserialize()
            .map_err(|e| {
                LessonloomError::from(ConfigError::new(format!(
                    "Failed to parse configuration: {}",
                    e
                )))
            })?;

        config.validate()?;
        Ok(config)
    }

    /// Check cross-field constraints.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` when the poll interval is zero,
    /// or the dialogue voices are not exactly two distinct speakers with
    /// distinct voices.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.poller.interval_ms == 0 {
            return Err(ConfigError::new("poller.interval_ms must be greater than 0"));
        }

        let voices = &self.speech.dialogue_voices;
        let speakers: HashSet<&str> = voices.iter().map(|v| v.speaker.as_str()).collect();
        let names: HashSet<&str> = voices.iter().map(|v| v.voice.as_str()).collect();
        if voices.len() != 2 || speakers.len() != 2 || names.len() != 2 {
            return Err(ConfigError::new(format!(
                "speech.dialogue_voices must map exactly two distinct speakers to two distinct voices, got {:?}",
                voices
            )));
        }

        Ok(())
    }

    /// Retry executor for ordinary stages, throttled if configured.
    pub fn executor(&self) -> RetryExecutor {
        let executor = RetryExecutor::new(self.retry.policy());
        match self.throttle.limiter() {
            Some(limiter) => executor.with_limiter(limiter),
            None => executor,
        }
    }
}
