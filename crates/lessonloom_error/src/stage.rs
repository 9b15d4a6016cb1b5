//! Stage-level error types.

/// Failure conditions raised by the pipeline stages themselves.
#[derive(Debug, Clone, PartialEq, Eq, Hash, derive_more::Display)]
pub enum StageErrorKind {
    /// No credential is present in the session.
    #[display("No API credential configured")]
    MissingCredential,
    /// A successful response carried no inline binary payload.
    #[display("Response for {} contained no media payload", _0)]
    MissingMediaPayload(String),
    /// The video job completed without a result locator.
    #[display("Video generation failed: {}", _0)]
    VideoFailed(String),
    /// The video job did not complete within the configured number of polls.
    #[display("Video job still pending after {} status checks", attempts)]
    PollTimeout {
        /// Number of status refreshes performed before giving up
        attempts: u32,
    },
    /// Inline media could not be base64-decoded.
    #[display("Base64 decode error: {}", _0)]
    Base64Decode(String),
    /// PCM samples could not be wrapped in an audio container.
    #[display("Audio encoding error: {}", _0)]
    AudioEncoding(String),
    /// Stage input was unusable (e.g. a course with no pages).
    #[display("Invalid stage input: {}", _0)]
    InvalidInput(String),
}

/// Stage error with source location tracking.
///
/// # Examples
///
/// ```
/// use lessonloom_error::{StageError, StageErrorKind};
///
/// let err = StageError::new(StageErrorKind::PollTimeout { attempts: 12 });
/// assert!(format!("{}", err).contains("12 status checks"));
/// ```
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Stage Error: {} at line {} in {}", kind, line, file)]
pub struct StageError {
    /// The kind of error that occurred
    pub kind: StageErrorKind,
    /// Line number where error was created
    pub line: u32,
    /// File where error was created
    pub file: &'static str,
}

impl StageError {
    /// Create a new StageError with automatic location tracking.
    #[track_caller]
    pub fn new(kind: StageErrorKind) -> Self {
        let location = std::panic::Location::caller();
        Self {
            kind,
            line: location.line(),
            file: location.file(),
        }
    }
}
