//! Test utilities for pipeline tests.
//!
//! This module provides a scripted generative service and fixture helpers.

#![allow(dead_code)]

pub mod mock_service;

use lessonloom_core::{PageImage, Session, VerifiedSource};
use lessonloom_pipeline::Pipeline;
use lessonloom_retry::LessonloomConfig;
use std::sync::Arc;

#[allow(unused_imports)]
pub use mock_service::{MockCall, MockJobReply, MockReply, MockService};

/// A signed-in session.
pub fn session() -> Session {
    Session::signed_in("test-key")
}

/// A small PNG-typed page image.
pub fn page_image() -> PageImage {
    PageImage::new("image/png", vec![0x89, 0x50, 0x4E, 0x47])
}

/// A confirmed source with distinctive fields.
pub fn verified_source() -> VerifiedSource {
    VerifiedSource::new(
        "Plants turn sunlight, water and CO2 into glucose.",
        "A green leaf with arrows showing light entering.",
    )
}

/// A pipeline over `mock` with default configuration.
pub fn pipeline(mock: &Arc<MockService>) -> Pipeline {
    pipeline_with(mock, LessonloomConfig::default())
}

/// A pipeline over `mock` with the given configuration.
pub fn pipeline_with(mock: &Arc<MockService>, config: LessonloomConfig) -> Pipeline {
    Pipeline::new(mock.clone(), config)
}
