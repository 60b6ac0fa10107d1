//! Subscriber installation.

use tracing_subscriber::util::TryInitError;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Filter used when `RUST_LOG` is unset.
pub const DEFAULT_FILTER: &str = "warn";

fn env_filter(default: &str) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default))
}

/// Installs a compact stderr subscriber.
///
/// Reads `RUST_LOG`, falling back to `warn`.
///
/// # Errors
///
/// Fails if a global subscriber is already set.
///
/// # Example
/// ```bash
/// RUST_LOG=publish=debug cargo test
/// ```
pub fn init() -> Result<(), TryInitError> {
    init_with_filter(DEFAULT_FILTER)
}

/// Like [`init`], with a custom fallback filter directive.
///
/// # Errors
///
/// Fails if a global subscriber is already set.
pub fn init_with_filter(default: &str) -> Result<(), TryInitError> {
    tracing_subscriber::registry()
        .with(env_filter(default))
        .with(fmt::layer().with_writer(std::io::stderr).compact())
        .try_init()
}

/// Installs a subscriber that writes one JSON object per event to stderr.
///
/// # Errors
///
/// Fails if a global subscriber is already set.
pub fn init_json() -> Result<(), TryInitError> {
    tracing_subscriber::registry()
        .with(env_filter(DEFAULT_FILTER))
        .with(
            fmt::layer()
                .json()
                .with_current_span(true)
                .with_writer(std::io::stderr),
        )
        .try_init()
}
