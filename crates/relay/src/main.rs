//! `cdr-relay` — binary entry point.
//!
//! Startup sequence:
//! 1. Load and validate [`Config`] from environment variables.
//! 2. Initialise structured logging and the process-level panic hook.
//! 3. Build the upstream CDR client.
//! 4. Build the Axum router with the origin guard attached.
//! 5. Run the listener bootstrap (TLS or plaintext) until the process dies.

use anyhow::Result;
use tracing::info;

use relay::config::Config;
use relay::server::{bootstrap, router, state::AppState};
use relay::telemetry;
use relay::upstream::UpstreamClient;

#[tokio::main]
async fn main() -> Result<()> {
    // -----------------------------------------------------------------------
    // 1. Configuration
    // -----------------------------------------------------------------------
    let cfg = Config::from_env().map_err(|e| {
        // Telemetry is not yet up; write to stderr directly.
        eprintln!("ERROR: configuration invalid: {e}");
        e
    })?;

    // -----------------------------------------------------------------------
    // 2. Telemetry
    // -----------------------------------------------------------------------
    telemetry::init(&cfg.log_level)?;
    telemetry::install_panic_hook();
    info!(
        version = env!("CARGO_PKG_VERSION"),
        port = cfg.port,
        use_https = cfg.use_https(),
        "cdr-relay starting"
    );

    // -----------------------------------------------------------------------
    // 3. Upstream client
    // -----------------------------------------------------------------------
    let upstream = UpstreamClient::new(&cfg.upstream_url)?;

    // -----------------------------------------------------------------------
    // 4. Router
    // -----------------------------------------------------------------------
    let state = AppState::new(upstream);
    let app = router::build(state, cfg.allowed_origins());

    // -----------------------------------------------------------------------
    // 5. Listener
    // -----------------------------------------------------------------------
    bootstrap::serve(&cfg, app).await
}
