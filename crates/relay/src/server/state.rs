//! Shared application state injected into every Axum handler.

use crate::upstream::UpstreamClient;

/// Application state shared across all request handlers.
///
/// Read-only after bootstrap; cloning is cheap because the upstream client is
/// `Arc`-backed internally.
#[derive(Clone)]
pub struct AppState {
    /// Client for the upstream CDR data source.
    pub upstream: UpstreamClient,
}

impl AppState {
    /// Create a new [`AppState`] wrapping the given upstream client.
    pub fn new(upstream: UpstreamClient) -> Self {
        Self { upstream }
    }
}

#[cfg(test)]
impl Default for AppState {
    /// State whose upstream points at an unroutable address, suitable for
    /// tests that exercise everything except a live upstream.
    fn default() -> Self {
        Self::new(UpstreamClient::new("http://127.0.0.1:1").expect("test client"))
    }
}
