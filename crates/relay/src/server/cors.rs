//! Origin guard: credentialed CORS against a fixed allow-list.
//!
//! A request without an `Origin` header is always permitted — curl, mobile
//! clients, and same-origin traffic never carry one. A present origin must be
//! an exact, case-sensitive member of the allow-list (scheme+host+port
//! literal, no wildcards). A denied origin simply gets no
//! `Access-Control-Allow-Origin` header back; the browser surfaces an opaque
//! CORS failure while the deny is logged server-side.

use axum::http::{request::Parts, HeaderValue, Method};
use tower_http::cors::{AllowCredentials, AllowHeaders, AllowOrigin, CorsLayer};
use tracing::warn;

/// Decide whether `origin` may receive a credentialed cross-origin response.
pub fn origin_allowed(allowed: &[String], origin: Option<&str>) -> bool {
    match origin {
        None => true,
        Some(o) => allowed.iter().any(|a| a == o),
    }
}

/// Build the CORS layer for the router.
///
/// Allowed origins are echoed back verbatim and credentials are permitted
/// (cookies/auth headers), which is why request headers are mirrored instead
/// of wildcarded — the CORS spec forbids `*` on credentialed responses.
pub fn layer(allowed: Vec<String>) -> CorsLayer {
    CorsLayer::new()
        .allow_origin(AllowOrigin::predicate(
            move |origin: &HeaderValue, _parts: &Parts| {
                let decision = origin
                    .to_str()
                    .map(|o| origin_allowed(&allowed, Some(o)))
                    .unwrap_or(false);
                if !decision {
                    warn!(origin = ?origin, "blocked origin");
                }
                decision
            },
        ))
        .allow_headers(AllowHeaders::mirror_request())
        .allow_credentials(AllowCredentials::yes())
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::PATCH,
            Method::DELETE,
        ])
}
