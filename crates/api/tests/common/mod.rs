#![allow(dead_code)]

use std::sync::Arc;
use std::time::Duration;

use axum::body::Body;
use axum::http::header::{AUTHORIZATION, CONTENT_TYPE};
use axum::http::{Request, Response};
use axum::Router;
use http_body_util::BodyExt;
use jsonwebtoken::{encode, EncodingKey, Header};
use serde::Serialize;
use textsum_core::summarization::{FixedConfidence, SteppingClock, Summarizer};
use textsum_core::roles::ROLE_USER;
use textsum_core::types::DbId;
use textsum_db::repositories::MemorySummaryStore;
use tower::ServiceExt;
use uuid::Uuid;

use textsum_api::auth::jwt::JwtConfig;
use textsum_api::config::ServerConfig;
use textsum_api::router::build_app_router;
use textsum_api::state::AppState;

/// Confidence reported by the test summarizer.
pub const TEST_CONFIDENCE: f64 = 0.9;
/// Milliseconds between two readings of the test clock.
pub const TEST_CLOCK_STEP_MS: u64 = 5;
/// Secret shared with the identity service in tests.
pub const TEST_JWT_SECRET: &str = "test-secret-that-is-long-enough-for-hmac";

pub fn test_jwt_config() -> JwtConfig {
    JwtConfig {
        secret: TEST_JWT_SECRET.to_string(),
        leeway_secs: 0,
    }
}

/// Build a test `ServerConfig` with safe defaults.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        shutdown_timeout_secs: 30,
        database_max_connections: 5,
        jwt: test_jwt_config(),
    }
}

/// The full router over an in-memory store, plus a handle on that store.
pub struct TestApp {
    pub router: Router,
    pub store: Arc<MemorySummaryStore>,
}

/// Build the application with the production middleware stack, an empty
/// in-memory store, and a deterministic summarizer.
pub fn build_test_app() -> TestApp {
    let store = Arc::new(MemorySummaryStore::new());
    let config = test_config();

    let state = AppState {
        store: store.clone(),
        summarizer: Summarizer::new(
            Arc::new(SteppingClock::new(Duration::from_millis(TEST_CLOCK_STEP_MS))),
            Arc::new(FixedConfidence(TEST_CONFIDENCE)),
        ),
        config: Arc::new(config.clone()),
    };

    TestApp {
        router: build_app_router(state, &config),
        store,
    }
}

/// Token payload as the identity service issues it.
#[derive(Serialize)]
struct IssuedClaims<'a> {
    sub: DbId,
    role: &'a str,
    exp: i64,
    iat: i64,
    jti: String,
}

/// Sign an access token the way the identity service does.
pub fn issue_token(user_id: DbId, role: &str, secret: &str, ttl_secs: i64) -> String {
    let now = chrono::Utc::now().timestamp();
    let claims = IssuedClaims {
        sub: user_id,
        role,
        exp: now + ttl_secs,
        iat: now,
        jti: Uuid::new_v4().to_string(),
    };
    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
    .unwrap()
}

/// `Authorization` header value for `user_id` holding `role`.
pub fn bearer_with_role(user_id: DbId, role: &str) -> String {
    let token = issue_token(user_id, role, TEST_JWT_SECRET, 900);
    format!("Bearer {token}")
}

/// `Authorization` header value for a regular user.
pub fn bearer(user_id: DbId) -> String {
    bearer_with_role(user_id, ROLE_USER)
}

impl TestApp {
    pub async fn send(&self, request: Request<Body>) -> Response<Body> {
        self.router.clone().oneshot(request).await.unwrap()
    }

    pub async fn get(&self, uri: &str, user_id: Option<DbId>) -> Response<Body> {
        self.send(build_request("GET", uri, user_id, None)).await
    }

    pub async fn delete(&self, uri: &str, user_id: Option<DbId>) -> Response<Body> {
        self.send(build_request("DELETE", uri, user_id, None)).await
    }

    pub async fn post_json(
        &self,
        uri: &str,
        user_id: Option<DbId>,
        body: serde_json::Value,
    ) -> Response<Body> {
        self.send(build_request("POST", uri, user_id, Some(body)))
            .await
    }

    pub async fn patch_json(
        &self,
        uri: &str,
        user_id: Option<DbId>,
        body: serde_json::Value,
    ) -> Response<Body> {
        self.send(build_request("PATCH", uri, user_id, Some(body)))
            .await
    }

    /// Save a history item for `user_id` and return its id.
    pub async fn save(&self, user_id: DbId, title: &str, original_text: &str) -> String {
        let response = self
            .post_json(
                "/api/history",
                Some(user_id),
                serde_json::json!({
                    "originalText": original_text,
                    "summary": "a short summary...",
                    "options": { "length": "short", "style": "paragraph", "extractKeywords": false },
                    "title": title,
                    "wordCount": 3,
                }),
            )
            .await;
        assert_eq!(response.status(), 201);
        body_json(response).await["id"]
            .as_str()
            .unwrap()
            .to_string()
    }
}

fn build_request(
    method: &str,
    uri: &str,
    user_id: Option<DbId>,
    body: Option<serde_json::Value>,
) -> Request<Body> {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(uid) = user_id {
        builder = builder.header(AUTHORIZATION, bearer(uid));
    }
    match body {
        Some(json) => builder
            .header(CONTENT_TYPE, "application/json")
            .body(Body::from(json.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    }
}

/// Collect a response body and parse it as JSON.
pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

/// `count` space-separated words: `w1 w2 ... wN`.
pub fn words(count: usize) -> String {
    (1..=count)
        .map(|i| format!("w{i}"))
        .collect::<Vec<_>>()
        .join(" ")
}
