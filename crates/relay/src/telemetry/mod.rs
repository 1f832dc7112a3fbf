//! Telemetry initialisation for the relay.
//!
//! Lightweight setup: structured JSON logs only, level driven by `RUST_LOG`
//! or the configured `LOG_LEVEL`.

use std::panic;

use anyhow::Result;
use tracing::error;
use tracing_subscriber::EnvFilter;

/// Initialise the tracing subscriber.
///
/// Outputs structured JSON logs to stdout at the configured log level.
///
/// # Errors
///
/// Returns an error if the subscriber has already been set.
pub fn init(log_level: &str) -> Result<()> {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(log_level));

    tracing_subscriber::fmt()
        .json()
        .with_env_filter(filter)
        .try_init()
        .map_err(|e| anyhow::anyhow!("failed to initialise tracing subscriber: {e}"))
}

/// Install a process-level panic hook that logs and continues.
///
/// A panic inside a spawned request task is already contained by the runtime;
/// the hook only makes sure it reaches the log stream instead of bare stderr.
/// This is a logging safety net, not a recovery mechanism — the relay holds
/// no cross-request mutable state a panic could corrupt.
pub fn install_panic_hook() {
    let default_hook = panic::take_hook();
    panic::set_hook(Box::new(move |panic_info| {
        error!(?panic_info, "panic");
        default_hook(panic_info);
    }));
}
