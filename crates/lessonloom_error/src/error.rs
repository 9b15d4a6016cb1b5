//! Top-level error wrapper types.

use crate::{
    ConfigError, ErrorCategory, RemoteError, RetryableError, StageError, StageErrorKind,
};

/// Every failure a Lessonloom operation can report.
///
/// # Examples
///
/// ```
/// use lessonloom_error::{LessonloomError, RemoteError, RemoteErrorKind};
///
/// let remote = RemoteError::new(RemoteErrorKind::Transport("connection reset".into()));
/// let err: LessonloomError = remote.into();
/// assert!(format!("{}", err).contains("connection reset"));
/// ```
#[derive(Debug, derive_more::From, derive_more::Display, derive_more::Error)]
pub enum LessonloomErrorKind {
    /// Remote service error
    #[from(RemoteError)]
    Remote(RemoteError),
    /// Stage error
    #[from(StageError)]
    Stage(StageError),
    /// Configuration error
    #[from(ConfigError)]
    Config(ConfigError),
}

/// Lessonloom error with kind discrimination.
#[derive(Debug, derive_more::Display, derive_more::Error)]
#[display("Lessonloom Error: {}", _0)]
pub struct LessonloomError(Box<LessonloomErrorKind>);

impl LessonloomError {
    /// Create a new error from a kind.
    pub fn new(kind: LessonloomErrorKind) -> Self {
        Self(Box::new(kind))
    }

    /// Get the error kind.
    pub fn kind(&self) -> &LessonloomErrorKind {
        &self.0
    }

    /// Reduce this error to its caller-facing category.
    pub fn category(&self) -> ErrorCategory {
        match self.kind() {
            LessonloomErrorKind::Remote(err) if err.is_rate_limited() => {
                ErrorCategory::RateLimited
            }
            LessonloomErrorKind::Remote(_) => ErrorCategory::RemoteService,
            LessonloomErrorKind::Config(_) => ErrorCategory::Configuration,
            LessonloomErrorKind::Stage(err) => match &err.kind {
                StageErrorKind::MissingCredential => ErrorCategory::MissingCredential,
                StageErrorKind::MissingMediaPayload(_) => ErrorCategory::MissingMediaPayload,
                StageErrorKind::VideoFailed(_) => ErrorCategory::VideoFailed,
                StageErrorKind::PollTimeout { .. } => ErrorCategory::PollTimeout,
                StageErrorKind::Base64Decode(_)
                | StageErrorKind::AudioEncoding(_)
                | StageErrorKind::InvalidInput(_) => ErrorCategory::Decoding,
            },
        }
    }
}

impl RetryableError for LessonloomError {
    fn is_rate_limited(&self) -> bool {
        match self.kind() {
            LessonloomErrorKind::Remote(err) => err.is_rate_limited(),
            _ => false,
        }
    }
}

// Generic From implementation for any type that converts to LessonloomErrorKind
impl<T> From<T> for LessonloomError
where
    T: Into<LessonloomErrorKind>,
{
    fn from(err: T) -> Self {
        Self::new(err.into())
    }
}

/// Result type for Lessonloom operations.
pub type LessonloomResult<T> = std::result::Result<T, LessonloomError>;
