//! End-to-end relay tests against a mock upstream CDR source.
//!
//! A small axum server plays the upstream on an ephemeral port; the relay
//! router sits in front of it and every assertion goes through the public
//! HTTP surface.

use axum::{
    body::Body,
    extract::RawQuery,
    http::{Request, StatusCode},
    routing::get,
    Json, Router,
};
use serde_json::json;
use tower::ServiceExt;

use relay::server::{router, state::AppState};
use relay::upstream::UpstreamClient;

/// Spawn the mock upstream, returning its base URL.
async fn spawn_upstream() -> String {
    let app = Router::new()
        .route(
            "/api/apr",
            get(|RawQuery(query): RawQuery| async move {
                Json(json!({
                    "answered": 120,
                    "placed": 200,
                    "rate": 0.6,
                    "query": query.unwrap_or_default(),
                }))
            }),
        )
        .route(
            "/api/agent_status",
            get(|| async {
                (
                    StatusCode::SERVICE_UNAVAILABLE,
                    Json(json!({"error": "agent feed offline"})),
                )
            }),
        );

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{addr}")
}

fn relay_router(upstream_url: &str) -> Router {
    let state = AppState::new(UpstreamClient::new(upstream_url).unwrap());
    router::build(state, vec!["http://localhost:3000".to_owned()])
}

async fn body_json(resp: axum::response::Response) -> serde_json::Value {
    let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

#[tokio::test]
async fn apr_is_relayed_verbatim() {
    let upstream = spawn_upstream().await;
    let resp = relay_router(&upstream)
        .oneshot(
            Request::builder()
                .uri("/api/apr")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    let json = body_json(resp).await;
    assert_eq!(json["answered"], 120);
    assert_eq!(json["placed"], 200);
}

#[tokio::test]
async fn query_string_is_forwarded_to_upstream() {
    let upstream = spawn_upstream().await;
    let resp = relay_router(&upstream)
        .oneshot(
            Request::builder()
                .uri("/api/apr?from=2024-01-01&to=2024-01-31")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    let json = body_json(resp).await;
    assert_eq!(json["query"], "from=2024-01-01&to=2024-01-31");
}

#[tokio::test]
async fn non_200_upstream_status_passes_through() {
    let upstream = spawn_upstream().await;
    let resp = relay_router(&upstream)
        .oneshot(
            Request::builder()
                .uri("/api/agent_status")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::SERVICE_UNAVAILABLE);
    let json = body_json(resp).await;
    assert_eq!(json["error"], "agent feed offline");
}

#[tokio::test]
async fn dead_upstream_yields_500_and_relay_stays_alive() {
    // Nothing listens on port 1.
    let app = relay_router("http://127.0.0.1:1");

    let failed = app
        .clone()
        .oneshot(
            Request::builder()
                .uri("/api/agent_status")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(failed.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let json = body_json(failed).await;
    assert!(json["error"].as_str().unwrap().contains("upstream"));

    let health = app
        .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(health.status(), StatusCode::OK);
    assert_eq!(
        body_json(health).await,
        json!({"message": "Server is running..."})
    );
}

#[tokio::test]
async fn allowed_origin_is_credentialed_on_relayed_routes() {
    let upstream = spawn_upstream().await;
    let resp = relay_router(&upstream)
        .oneshot(
            Request::builder()
                .uri("/api/apr")
                .header("origin", "http://localhost:3000")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(
        resp.headers()
            .get("access-control-allow-origin")
            .and_then(|v| v.to_str().ok()),
        Some("http://localhost:3000")
    );
    assert_eq!(
        resp.headers()
            .get("access-control-allow-credentials")
            .and_then(|v| v.to_str().ok()),
        Some("true")
    );
}

#[tokio::test]
async fn unlisted_origin_gets_no_cors_header_on_relayed_routes() {
    let upstream = spawn_upstream().await;
    let resp = relay_router(&upstream)
        .oneshot(
            Request::builder()
                .uri("/api/apr")
                .header("origin", "http://unlisted.example")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert!(resp.headers().get("access-control-allow-origin").is_none());
}
