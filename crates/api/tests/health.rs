mod common;

use axum::http::StatusCode;
use common::{body_json, build_test_app};

#[tokio::test]
async fn health_is_public_and_reports_store() {
    let app = build_test_app();

    let response = app.get("/health", None).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert!(response.headers().contains_key("x-request-id"));

    let json = body_json(response).await;
    assert_eq!(json["status"], "ok");
    assert_eq!(json["db_healthy"], true);
    assert!(json["version"].is_string());
}

#[tokio::test]
async fn unknown_route_is_404() {
    let app = build_test_app();

    let response = app.get("/api/nope", Some(1)).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
