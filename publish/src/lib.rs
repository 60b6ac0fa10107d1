//! # Publish
//!
//! A staged publish pipeline with automatic rollback, built on an ordered,
//! JSON-like value tree.
//!
//! A publish runs three forward stages in order: `pre_publish`, `publish`
//! and `post_publish`. Each stage receives the previous stage's [`Context`]
//! and returns a new one. When a stage fails, the runner undoes it and every
//! earlier stage in reverse order before reporting the failure.
//!
//! - **Values**: [`Value`] is a closed tree of none, booleans, 64-bit
//!   integers, floats, strings, arrays and insertion-ordered objects
//! - **Context**: an ordered, string-keyed bag of values passed between stages
//! - **Pipelines**: implement [`Publish`] or assemble one with [`FnPublish`]
//! - **Runner**: [`run`] or a configured [`PublishRunner`] with run reports
//!
//! ## Quick Start
//!
//! ```rust
//! use publish::prelude::*;
//!
//! let pipeline = FnPublish::new("release")
//!     .with_pre_publish(|ctx| {
//!         let mut next = ctx.clone();
//!         next.set_string("version", "1.4.0");
//!         Ok(next)
//!     })
//!     .with_publish(|ctx| {
//!         let mut next = ctx.clone();
//!         next.set_bool("uploaded", true);
//!         Ok(next)
//!     });
//!
//! let context = run(&pipeline).unwrap();
//! assert_eq!(context.len(), 2);
//! ```
//!
//! [`Context`]: context::Context
//! [`Value`]: value::Value
//! [`Publish`]: pipeline::Publish
//! [`FnPublish`]: pipeline::FnPublish
//! [`PublishRunner`]: pipeline::PublishRunner

#![forbid(unsafe_code)]
#![warn(
    clippy::all,
    clippy::pedantic,
    missing_docs,
    rust_2018_idioms
)]
#![allow(
    clippy::module_name_repetitions,
    clippy::must_use_candidate,
    clippy::missing_errors_doc,
    clippy::missing_panics_doc
)]

pub mod context;
pub mod core;
pub mod errors;
pub mod observability;
pub mod pipeline;
pub mod testing;
pub mod value;

pub use pipeline::run;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::context::Context;
    pub use crate::core::{PublishStage, PublishState};
    pub use crate::errors::{PublishError, RollbackFailure, RunError, ValueError};
    pub use crate::pipeline::{
        DefaultPublish, FnPublish, Publish, PublishRunner, RollbackPolicy, RunReport,
        RunnerConfig, run,
    };
    pub use crate::value::{ArrayCursor, Object, ObjectCursor, Value, ValueType};
}
