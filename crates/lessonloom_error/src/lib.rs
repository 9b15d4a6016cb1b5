//! Error types for the Lessonloom pipeline.
//!
//! This crate provides the foundation error types used throughout the Lessonloom workspace.
//!
//! # Error Hierarchy
//!
//! All errors follow the `ErrorKind` + wrapper struct pattern:
//! - `*ErrorKind` enum defines specific error conditions
//! - `*Error` struct wraps the kind with source location tracking
//! - All errors use `#[track_caller]` for automatic location capture
//!
//! Every error can be reduced to an [`ErrorCategory`], which is what callers
//! use to decide between retrying a stage, asking the operator to re-verify
//! inputs, or giving up.
//!
//! # Examples
//!
//! ```
//! use lessonloom_error::{ErrorCategory, LessonloomResult, StageError, StageErrorKind};
//!
//! fn narrate() -> LessonloomResult<Vec<u8>> {
//!     Err(StageError::new(StageErrorKind::MissingCredential))?
//! }
//!
//! let err = narrate().unwrap_err();
//! assert_eq!(err.category(), ErrorCategory::MissingCredential);
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod category;
mod config;
mod error;
mod remote;
mod stage;

pub use category::ErrorCategory;
pub use config::ConfigError;
pub use error::{LessonloomError, LessonloomErrorKind, LessonloomResult};
pub use remote::{RemoteError, RemoteErrorKind, RetryableError};
pub use stage::{StageError, StageErrorKind};
