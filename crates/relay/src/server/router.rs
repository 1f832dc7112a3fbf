//! Axum router construction.

use axum::{routing::get, Router};
use tower_http::trace::TraceLayer;

use super::{cors, handlers, state::AppState};

/// Build the application [`Router`] with all routes and middleware attached.
///
/// The origin guard is the outermost layer so CORS headers are applied to
/// every response, the 404 fallback included.
pub fn build(state: AppState, allowed_origins: Vec<String>) -> Router {
    // Method mismatches on known paths get the same 404 contract as unknown
    // paths, hence the per-route fallbacks.
    Router::new()
        .route("/", get(handlers::health).fallback(handlers::not_found))
        .route("/api/apr", get(handlers::apr).fallback(handlers::not_found))
        .route(
            "/api/agent_status",
            get(handlers::agent_status).fallback(handlers::not_found),
        )
        .fallback(handlers::not_found)
        .layer(TraceLayer::new_for_http())
        .layer(cors::layer(allowed_origins))
        .with_state(state)
}
