use std::sync::Arc;

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode, header};
use gubae::router::init_router;
use gubae::state::AppState;
use gubae_config::{CorsConfig, JwtConfig};
use gubae_db::MemoryDocumentStore;
use http_body_util::BodyExt;
use serde_json::Value;
use tower::ServiceExt;

pub const TEST_SECRET: &str = "integration-test-secret-0123456789abcdef";
pub const TEST_ADMIN: &str = "admin@example.com";

pub struct TestApp {
    pub router: Router,
    pub state: AppState,
}

/// App backed by a fresh in-memory store; every test gets its own.
pub fn setup_test_app() -> TestApp {
    let state = AppState::new(
        Arc::new(MemoryDocumentStore::new()),
        &JwtConfig::new(TEST_SECRET),
        CorsConfig::parse("*"),
    );

    TestApp {
        router: init_router(state.clone()),
        state,
    }
}

#[allow(dead_code)]
impl TestApp {
    pub fn token(&self) -> String {
        self.state.tokens.issue(TEST_ADMIN).unwrap()
    }

    pub async fn request(
        &self,
        method: &str,
        uri: &str,
        authorization: Option<&str>,
        body: Option<Value>,
    ) -> (StatusCode, Value) {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(value) = authorization {
            builder = builder.header(header::AUTHORIZATION, value);
        }

        let request = match body {
            Some(json) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(serde_json::to_vec(&json).unwrap()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };

        let response = self.router.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let body = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap()
        };

        (status, body)
    }

    /// Request carrying a valid bearer token.
    pub async fn authed(&self, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
        let bearer = format!("Bearer {}", self.token());
        self.request(method, uri, Some(&bearer), body).await
    }

    pub async fn create(&self, uri: &str, body: Value) -> Value {
        let (status, created) = self.authed("POST", uri, Some(body)).await;
        assert_eq!(status, StatusCode::CREATED, "create at {} failed: {}", uri, created);
        created
    }
}

#[allow(dead_code)]
pub fn id_of(record: &Value) -> String {
    record["id"].as_str().unwrap().to_string()
}
