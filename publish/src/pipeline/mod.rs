//! Publish pipelines and their execution.
//!
//! This module provides:
//! - The [`Publish`] trait and its default stages
//! - A closure-based pipeline, [`FnPublish`]
//! - The runner state machine with reverse-order rollback
//! - Run configuration and reports

mod config;
pub mod defaults;
mod fn_publish;
mod publish;
mod report;
mod runner;

#[cfg(test)]
mod runner_tests;

pub use config::{RollbackPolicy, RunnerConfig};
pub use fn_publish::FnPublish;
pub use publish::{DefaultPublish, Publish};
pub use report::{RollbackRecord, RunReport};
pub use runner::{PublishRunner, run};
