//! Caller-facing classification of failures.

/// Coarse failure category a caller can act on.
///
/// `MissingCredential` asks the operator to sign in, `RateLimited` and
/// `PollTimeout` are worth retrying the whole stage later, `MissingMediaPayload`
/// usually means the inputs should be re-verified, and the rest are terminal.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    derive_more::Display,
)]
pub enum ErrorCategory {
    /// No credential configured; nothing was sent.
    #[display("missing credential")]
    MissingCredential,
    /// Throttled by the remote service after the retry budget ran out.
    #[display("rate limited")]
    RateLimited,
    /// Any other remote failure.
    #[display("remote service error")]
    RemoteService,
    /// The response lacked the expected binary payload.
    #[display("missing media payload")]
    MissingMediaPayload,
    /// The video job finished without a result.
    #[display("video failed")]
    VideoFailed,
    /// The video job exceeded the poll cap.
    #[display("poll timeout")]
    PollTimeout,
    /// Configuration could not be loaded.
    #[display("configuration")]
    Configuration,
    /// Local decoding or encoding of a payload failed.
    #[display("decoding")]
    Decoding,
}

impl ErrorCategory {
    /// Whether re-running the whole stage later might succeed.
    pub fn is_transient(&self) -> bool {
        matches!(self, ErrorCategory::RateLimited | ErrorCategory::PollTimeout)
    }
}
