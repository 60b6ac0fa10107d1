//! Observability utilities.
//!
//! The runner emits `tracing` events and a `publish_run` span per run. These
//! helpers install a subscriber for binaries and tests that want to see them.

mod subscriber;

pub use subscriber::{DEFAULT_FILTER, init, init_json, init_with_filter};
