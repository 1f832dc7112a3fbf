//! Axum request handlers for all relay endpoints.

use axum::{
    extract::{RawQuery, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use common::protocol::{ErrorResponse, HealthResponse};
use common::RelayError;
use tracing::error;

use super::state::AppState;
use crate::upstream::UpstreamReply;

/// `GET /` — health check.
pub async fn health() -> impl IntoResponse {
    (StatusCode::OK, Json(HealthResponse::running()))
}

/// `GET /api/apr` — relay aggregate CDR statistics from the upstream source.
///
/// Status and body pass through untouched; the inbound query string is
/// forwarded verbatim.
pub async fn apr(State(state): State<AppState>, RawQuery(query): RawQuery) -> Response {
    match state.upstream.apr(query.as_deref()).await {
        Ok(reply) => relay_reply(reply),
        Err(e) => handler_error("/api/apr", &e),
    }
}

/// `GET /api/agent_status` — relay current agent status, same contract as
/// [`apr`].
pub async fn agent_status(State(state): State<AppState>, RawQuery(query): RawQuery) -> Response {
    match state.upstream.agent_status(query.as_deref()).await {
        Ok(reply) => relay_reply(reply),
        Err(e) => handler_error("/api/agent_status", &e),
    }
}

/// Catch-all 404 handler.
pub async fn not_found() -> impl IntoResponse {
    (StatusCode::NOT_FOUND, Json(ErrorResponse::new("Not Found")))
}

/// Turn an upstream reply into the client response without transformation.
fn relay_reply(reply: UpstreamReply) -> Response {
    (
        reply.status,
        [(header::CONTENT_TYPE, "application/json")],
        reply.body,
    )
        .into_response()
}

/// Log the full error server-side, send the message-only JSON body.
fn handler_error(route: &str, e: &RelayError) -> Response {
    error!(route, error = %e, "handler error");
    let status = StatusCode::from_u16(e.http_status())
        .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
    (status, Json(ErrorResponse::new(e.to_string()))).into_response()
}
