mod common;

use std::sync::Arc;

use axum::http::StatusCode;
use chrono::{Duration, Utc};
use gubae_auth::TokenCodec;
use gubae_config::JwtConfig;
use serde_json::json;

use common::{TEST_ADMIN, setup_test_app};

#[tokio::test]
async fn test_register_login_flow() {
    let app = setup_test_app();
    let credentials = json!({ "email": "abune@example.com", "password": "kidase123" });

    let (status, admin) = app
        .request("POST", "/api/auth/register", None, Some(credentials.clone()))
        .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(admin["email"], "abune@example.com");
    assert!(admin["id"].is_string());
    assert!(admin.get("password").is_none());

    let (status, body) = app
        .request("POST", "/api/auth/register", None, Some(credentials.clone()))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Admin already exists");

    let (status, body) = app
        .request(
            "POST",
            "/api/auth/login",
            None,
            Some(json!({ "email": "abune@example.com", "password": "wrong-password" })),
        )
        .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["error"], "Invalid email or password");

    let (status, body) = app
        .request("POST", "/api/auth/login", None, Some(credentials))
        .await;
    assert_eq!(status, StatusCode::OK);
    let token = body["accessToken"].as_str().unwrap().to_string();

    let claims = app.state.tokens.verify(&token).claims().unwrap();
    assert_eq!(claims.sub, "abune@example.com");

    let (status, members) = app
        .request("GET", "/api/members", Some(&format!("Bearer {}", token)), None)
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(members, json!([]));
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_registrations_create_one_admin() {
    let app = Arc::new(setup_test_app());
    let credentials = json!({ "email": "dup@example.com", "password": "kidase123" });

    let handles: Vec<_> = (0..4)
        .map(|_| {
            let app = app.clone();
            let credentials = credentials.clone();
            tokio::spawn(async move {
                app.request("POST", "/api/auth/register", None, Some(credentials))
                    .await
            })
        })
        .collect();

    let mut created = 0;
    for handle in handles {
        let (status, body) = handle.await.unwrap();
        match status {
            StatusCode::CREATED => created += 1,
            _ => {
                assert_eq!(status, StatusCode::BAD_REQUEST);
                assert_eq!(body["error"], "Admin already exists");
            }
        }
    }
    assert_eq!(created, 1);

    let (status, _) = app
        .request("POST", "/api/auth/login", None, Some(credentials))
        .await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn test_login_unknown_email_is_not_found() {
    let app = setup_test_app();

    let (status, body) = app
        .request(
            "POST",
            "/api/auth/login",
            None,
            Some(json!({ "email": "nobody@example.com", "password": "whatever" })),
        )
        .await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "Invalid email or password");
}

#[tokio::test]
async fn test_register_validation_errors() {
    let app = setup_test_app();

    let (status, body) = app
        .request(
            "POST",
            "/api/auth/register",
            None,
            Some(json!({ "email": "not-an-email", "password": "kidase123" })),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Email must be a valid email address");

    let (status, body) = app
        .request(
            "POST",
            "/api/auth/register",
            None,
            Some(json!({ "email": "abune@example.com" })),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "password is required");
}

#[tokio::test]
async fn test_missing_token_is_unauthorized() {
    let app = setup_test_app();

    for authorization in [None, Some("Bearer"), Some("")] {
        let (status, body) = app.request("GET", "/api/groups", authorization, None).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(body["error"], "Access token is missing");
    }
}

#[tokio::test]
async fn test_invalid_tokens_are_forbidden() {
    let app = setup_test_app();

    let (status, body) = app
        .request("GET", "/api/staff", Some("Bearer not.a.token"), None)
        .await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert!(body["error"].as_str().is_some_and(|e| !e.is_empty()));

    let foreign = TokenCodec::new(&JwtConfig::new("another-secret-0123456789abcdef-xyz"))
        .issue(TEST_ADMIN)
        .unwrap();
    let (status, body) = app
        .request("GET", "/api/staff", Some(&format!("Bearer {}", foreign)), None)
        .await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["error"], "Invalid token signature");
}

#[tokio::test]
async fn test_expired_token_is_forbidden() {
    let app = setup_test_app();
    let expired = app
        .state
        .tokens
        .issue_at(TEST_ADMIN, Utc::now() - Duration::hours(6))
        .unwrap();

    let (status, body) = app
        .request("GET", "/api/teachers", Some(&format!("Bearer {}", expired)), None)
        .await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["error"], "Token has expired");
}

#[tokio::test]
async fn test_any_scheme_word_is_accepted() {
    let app = setup_test_app();
    let token = app.token();

    let (status, _) = app
        .request("GET", "/api/services", Some(&format!("Token {}", token)), None)
        .await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn test_every_resource_is_guarded() {
    let app = setup_test_app();

    for uri in [
        "/api/members",
        "/api/members/alumni",
        "/api/groups/with-count",
        "/api/staff",
        "/api/teachers",
        "/api/services",
    ] {
        let (status, _) = app.request("GET", uri, None, None).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED, "{} is not guarded", uri);
    }

    let (status, _) = app
        .request(
            "PUT",
            "/api/members/transfer-to-alumni",
            None,
            Some(json!({ "memberIds": [] })),
        )
        .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_openapi_document_is_public() {
    let app = setup_test_app();

    let (status, doc) = app.request("GET", "/api-docs/openapi.json", None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(doc["info"]["title"], "Gubae API");
}
