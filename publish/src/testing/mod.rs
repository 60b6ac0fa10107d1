//! Testing utilities for publish pipelines.
//!
//! This module provides:
//! - A recording wrapper that logs every stage call
//! - A configurable fixture pipeline
//! - Assertions for contexts and run results

mod assertions;
mod fixtures;
mod mocks;

pub use assertions::{
    assert_context_missing, assert_context_string, assert_run_failed_at, assert_run_succeeded,
};
pub use fixtures::{TestPipeline, context_of};
pub use mocks::{PublishCall, RecordingPublish};
