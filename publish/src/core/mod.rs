//! Core domain model types for publish.
//!
//! This module contains the stage and run-state enums shared by the runner,
//! the error types and the report.

mod status;

pub use status::{PublishStage, PublishState};
