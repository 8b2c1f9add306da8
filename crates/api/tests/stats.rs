//! Integration tests for `GET /api/stats`.

mod common;

use axum::http::StatusCode;
use common::{body_json, build_test_app, words};
use serde_json::json;

#[tokio::test]
async fn no_history_gives_zeros() {
    let app = build_test_app();

    let response = app.get("/api/stats", Some(1)).await;
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    assert_eq!(body["totalSummaries"], 0);
    assert_eq!(body["totalWordsSummarized"], 0);
    assert_eq!(body["averageCompressionRatio"], 0.0);
}

#[tokio::test]
async fn aggregates_only_the_callers_rows() {
    let app = build_test_app();
    // 12/3 = 4.0 and 15/3 = 5.0
    app.save(1, "a", &words(12)).await;
    app.save(1, "b", &words(15)).await;
    app.save(2, "other", &words(30)).await;

    let body = body_json(app.get("/api/stats", Some(1)).await).await;
    assert_eq!(
        body,
        json!({
            "totalSummaries": 2,
            "totalWordsSummarized": 27,
            "averageCompressionRatio": 4.5,
        })
    );
}

#[tokio::test]
async fn average_is_rounded_to_two_places() {
    let app = build_test_app();
    // 10/3, 10/3, 17/3 -> mean 4.111...
    app.save(1, "a", &words(10)).await;
    app.save(1, "b", &words(10)).await;
    app.save(1, "c", &words(17)).await;

    let body = body_json(app.get("/api/stats", Some(1)).await).await;
    assert_eq!(body["averageCompressionRatio"], 4.11);
}
