//! Remote service error types and rate-limit classification.

/// Google RPC status reported when a quota is exhausted.
const RESOURCE_EXHAUSTED: &str = "RESOURCE_EXHAUSTED";

/// Failure conditions surfaced by the remote generative service.
#[derive(Debug, Clone, PartialEq, Eq, Hash, derive_more::Display)]
pub enum RemoteErrorKind {
    /// The service answered with a non-success HTTP status.
    #[display("HTTP {} error: {}", status_code, message)]
    Http {
        /// HTTP status code
        status_code: u16,
        /// RPC status string from the error body (e.g. `RESOURCE_EXHAUSTED`)
        status: Option<String>,
        /// Error message
        message: String,
    },
    /// The request never produced a response (DNS, TLS, connection reset).
    #[display("Request failed: {}", _0)]
    Transport(String),
    /// The response body could not be decoded into the expected shape.
    #[display("Malformed response: {}", _0)]
    Decode(String),
}

impl RemoteErrorKind {
    /// Whether this failure indicates request-volume throttling.
    ///
    /// An HTTP response is classified by its structured signals alone: status
    /// 429 or an RPC status of `RESOURCE_EXHAUSTED`. Message matching only
    /// applies to transport failures, which carry no status at all.
    pub fn is_rate_limited(&self) -> bool {
        match self {
            RemoteErrorKind::Http {
                status_code,
                status,
                ..
            } => *status_code == 429 || status.as_deref() == Some(RESOURCE_EXHAUSTED),
            RemoteErrorKind::Transport(message) => message_indicates_rate_limit(message),
            RemoteErrorKind::Decode(_) => false,
        }
    }
}

/// Last-resort classification for errors that carry only text.
fn message_indicates_rate_limit(message: &str) -> bool {
    message.contains("429")
        || message.contains(RESOURCE_EXHAUSTED)
        || message.to_ascii_lowercase().contains("quota")
}

/// Remote service error with source location tracking.
///
/// # Examples
///
/// ```
/// use lessonloom_error::{RemoteError, RemoteErrorKind, RetryableError};
///
/// let err = RemoteError::new(RemoteErrorKind::Http {
///     status_code: 429,
///     status: None,
///     message: "Too many requests".to_string(),
/// });
/// assert!(err.is_rate_limited());
/// ```
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Remote Error: {} at line {} in {}", kind, line, file)]
pub struct RemoteError {
    /// The kind of error that occurred
    pub kind: RemoteErrorKind,
    /// Line number where error was created
    pub line: u32,
    /// File where error was created
    pub file: &'static str,
}

impl RemoteError {
    /// Create a new RemoteError with automatic location tracking.
    #[track_caller]
    pub fn new(kind: RemoteErrorKind) -> Self {
        let location = std::panic::Location::caller();
        Self {
            kind,
            line: location.line(),
            file: location.file(),
        }
    }
}

/// Trait for errors the retry executor can classify.
///
/// Only rate-limit failures are retried. Everything else, including server
/// errors, propagates on first occurrence.
pub trait RetryableError {
    /// Returns true if this error is a transient rate-limit failure.
    fn is_rate_limited(&self) -> bool;
}

impl RetryableError for RemoteError {
    fn is_rate_limited(&self) -> bool {
        self.kind.is_rate_limited()
    }
}
