//! Listener bootstrap: bind once, then serve TLS or plaintext.
//!
//! Decision tree, run once at startup:
//! 1. Bind the host:port. A bind failure is fatal — log a specific
//!    diagnostic (address-in-use and permission-denied are distinguished)
//!    and exit with status 1. No retry, no backoff.
//! 2. `USE_HTTPS=true` and TLS material discovered → encrypted listener.
//! 3. `USE_HTTPS=true` but no usable material → warn and fall back to
//!    plaintext on the same socket.
//! 4. Toggle off → plaintext listener.

use std::io;
use std::net::TcpListener;

use anyhow::{Context, Result};
use axum::Router;
use axum_server::tls_rustls::RustlsConfig;
use tracing::{error, info, warn};

use super::tls;
use crate::config::Config;

/// Bind the configured host:port and serve `router` until the process dies.
///
/// Terminates the process (exit 1) on bind failure; runtime listener errors
/// propagate as `Err` and are handled the same way by `main`.
pub async fn serve(cfg: &Config, router: Router) -> Result<()> {
    let listener = match bind(cfg) {
        Ok(l) => l,
        Err(e) => {
            error!(error = %e, "{}", describe_bind_error(&e, cfg.port));
            std::process::exit(1);
        }
    };
    listener
        .set_nonblocking(true)
        .context("failed to set listener non-blocking")?;

    if cfg.use_https() {
        let base = std::env::current_dir().context("failed to resolve working directory")?;
        match tls::load_material(cfg, &base) {
            Some(material) => {
                let server_config = tls::build_server_config(&material)?;
                info!(host = %cfg.host, port = cfg.port, "https server listening");
                axum_server::from_tcp_rustls(listener, RustlsConfig::from_config(server_config))
                    .serve(router.into_make_service())
                    .await
                    .context("https server error")?;
                return Ok(());
            }
            None => {
                // Explicitly requested HTTPS without certificates downgrades
                // to plaintext rather than refusing to start.
                warn!("SSL not available; starting HTTP instead");
            }
        }
    }

    info!(
        host = %cfg.host,
        port = cfg.port,
        public_url = cfg.public_url.as_deref().unwrap_or(""),
        "http server listening"
    );
    axum_server::from_tcp(listener)
        .serve(router.into_make_service())
        .await
        .context("http server error")?;

    Ok(())
}

/// Bind the configured address. `host` may be an IP or a resolvable name.
fn bind(cfg: &Config) -> io::Result<TcpListener> {
    TcpListener::bind((cfg.host.as_str(), cfg.port))
}

/// Human-readable diagnostic for a bind failure.
fn describe_bind_error(e: &io::Error, port: u16) -> String {
    match e.kind() {
        io::ErrorKind::AddrInUse => format!("port {port} is already in use"),
        io::ErrorKind::PermissionDenied => {
            format!("permission denied; port {port} may require elevated privileges")
        }
        _ => format!("failed to bind port {port}"),
    }
}
