// Each integration test file is a separate binary; helpers not used in every
// binary would otherwise trigger dead_code warnings from clippy.
#![allow(dead_code)]

use axum::{
    body::Body,
    http::{header, Method, Request, StatusCode},
    routing::{get, post},
    Router,
};
use http_body_util::BodyExt;
use tower::ServiceExt;

use linkpeek_server::{handlers, state::AppState};

/// Endpoints that must never be contacted by validation-only tests; a test
/// hitting them would fail on name resolution rather than hang.
pub const TEST_RELAY_BASE: &str = "https://relay.invalid/?";
pub const TEST_METADATA_SERVICE: &str = "https://metadata.invalid/api/metadata";

/// Build the full application router wired to test endpoints.
pub fn create_test_app() -> Router {
    let state = AppState::new(TEST_RELAY_BASE, TEST_METADATA_SERVICE);
    Router::new()
        .route("/health", get(handlers::health_check))
        .route("/resolve", get(handlers::resolve::resolve_metadata))
        .route("/render", post(handlers::preview::render_preview))
        .route("/meta-tags", post(handlers::preview::generate_meta_tags))
        .with_state(state)
}

/// Issue a GET and return (status, body-as-string).
pub async fn get_request(app: Router, uri: &str) -> (StatusCode, String) {
    let response = app
        .oneshot(
            Request::builder()
                .method(Method::GET)
                .uri(uri)
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    (status, String::from_utf8_lossy(&bytes).to_string())
}

/// Issue a POST with a JSON body and return (status, body-as-string).
pub async fn post_json(app: Router, uri: &str, body: serde_json::Value) -> (StatusCode, String) {
    let response = app
        .oneshot(
            Request::builder()
                .method(Method::POST)
                .uri(uri)
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
        )
        .await
        .unwrap();

    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    (status, String::from_utf8_lossy(&bytes).to_string())
}
