//! Core data types for the Lessonloom content pipeline.
//!
//! This crate provides the entities the pipeline reads from ([`Course`], [`Page`]),
//! the per-call [`Session`] carrying the runtime credential, the verified
//! [`VerifiedSource`] that downstream prompts quote verbatim, and the value
//! types stages hand back to the caller ([`MediaBlob`], [`PageAnalysis`],
//! [`StructuredOutcome`]).
//!
//! Stages never mutate these entities. Storing a stage result on a page and
//! persisting produced blobs is the caller's job.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod analysis;
mod asset;
mod course;
mod media;
mod page;
mod session;
mod verified;

pub use analysis::{PageAnalysis, StructuredOutcome};
pub use asset::AssetId;
pub use course::Course;
pub use media::{MediaBlob, MediaKind, PageImage};
pub use page::{AspectRatio, Page, VideoResolution};
pub use session::{Credential, Session};
pub use verified::VerifiedSource;
