//! Thin HTTP client for the upstream CDR data source.

use std::time::Duration;

use anyhow::{Context, Result};
use axum::http::StatusCode;
use bytes::Bytes;
use common::RelayError;

/// Per-request timeout applied to all upstream calls. The router itself
/// imposes no timeout of its own.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// An upstream response, relayed without transformation.
#[derive(Debug)]
pub struct UpstreamReply {
    /// Upstream HTTP status, passed through verbatim.
    pub status: StatusCode,
    /// Raw response body bytes.
    pub body: Bytes,
}

/// Client for the two read-only CDR queries.
///
/// Cheaply cloneable — `reqwest::Client` is an `Arc` over its connection pool.
#[derive(Clone)]
pub struct UpstreamClient {
    http: reqwest::Client,
    base: String,
}

impl UpstreamClient {
    /// Build a client for the upstream at `base_url`.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying HTTP client cannot be constructed.
    pub fn new(base_url: &str) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .context("failed to build upstream HTTP client")?;
        Ok(Self {
            http,
            base: base_url.trim_end_matches('/').to_owned(),
        })
    }

    /// Fetch aggregate APR (answered/placed/rate) CDR statistics.
    pub async fn apr(&self, query: Option<&str>) -> Result<UpstreamReply, RelayError> {
        self.get("/api/apr", query).await
    }

    /// Fetch current agent status.
    pub async fn agent_status(&self, query: Option<&str>) -> Result<UpstreamReply, RelayError> {
        self.get("/api/agent_status", query).await
    }

    /// Issue a GET and capture status + body without interpreting either.
    async fn get(&self, path: &str, query: Option<&str>) -> Result<UpstreamReply, RelayError> {
        let url = build_url(&self.base, path, query);
        let resp = self
            .http
            .get(&url)
            .send()
            .await
            .map_err(|e| RelayError::Upstream(e.to_string()))?;

        // reqwest and axum may pin different `http` versions; convert by value.
        let status = StatusCode::from_u16(resp.status().as_u16())
            .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

        let body = resp
            .bytes()
            .await
            .map_err(|e| RelayError::Upstream(e.to_string()))?;

        Ok(UpstreamReply { status, body })
    }
}

/// Join base, path, and the inbound query string (forwarded verbatim).
fn build_url(base: &str, path: &str, query: Option<&str>) -> String {
    match query {
        Some(q) if !q.is_empty() => format!("{base}{path}?{q}"),
        _ => format!("{base}{path}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn build_url_without_query() {
        assert_eq!(
            build_url("http://10.5.50.245:8080", "/api/apr", None),
            "http://10.5.50.245:8080/api/apr"
        );
    }

    #[test]
    fn build_url_forwards_query_verbatim() {
        assert_eq!(
            build_url(
                "http://cdr.local",
                "/api/apr",
                Some("from=2024-01-01&to=2024-01-31")
            ),
            "http://cdr.local/api/apr?from=2024-01-01&to=2024-01-31"
        );
    }

    #[test]
    fn build_url_ignores_empty_query() {
        assert_eq!(
            build_url("http://cdr.local", "/api/agent_status", Some("")),
            "http://cdr.local/api/agent_status"
        );
    }

    #[test]
    fn new_strips_trailing_slash() {
        let client = UpstreamClient::new("http://cdr.local/").unwrap();
        assert_eq!(client.base, "http://cdr.local");
    }
}
