//! Context management for publish runs.
//!
//! The [`Context`] is the top-level state bag handed from stage to stage.

mod bags;

pub use bags::Context;
