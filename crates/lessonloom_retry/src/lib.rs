//! Retry, throttling and configuration for remote calls.
//!
//! - [`RetryExecutor`] re-runs an operation only when it fails with a
//!   rate-limit error, waiting `base_delay`, then twice that, and so on,
//!   until the retry budget is spent.
//! - [`RateLimiter`] optionally throttles requests client-side (requests per
//!   minute and concurrent requests) before each attempt.
//! - [`LessonloomConfig`] loads retry, poller, throttle, model and speech
//!   settings from layered TOML files.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod config;
mod executor;
mod limiter;

pub use config::{
    ApiSettings, LessonloomConfig, ModelSettings, PollerSettings, RetrySettings, SpeakerVoice,
    SpeechSettings, ThrottleSettings,
};
pub use executor::{RetryExecutor, RetryPolicy};
pub use limiter::{RateLimiter, RateLimiterGuard};
