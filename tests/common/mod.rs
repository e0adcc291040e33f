//! Shared fixtures for integration tests: an app state over the in-memory
//! user store, plus small request/response helpers.
#![allow(dead_code)]

use std::sync::Arc;

use axum::Router;
use axum::body::Body;
use axum::http::{Request, Response, header};
use http_body_util::BodyExt;
use serde_json::Value;
use tower::ServiceExt;

use inkshelf::config::cors::CorsConfig;
use inkshelf::config::email::EmailConfig;
use inkshelf::config::jwt::JwtConfig;
use inkshelf::state::AppState;
use inkshelf::store::memory::MemoryUserStore;

pub const TEST_SECRET: &str = "integration-test-secret-key";

pub fn test_state() -> (Arc<MemoryUserStore>, AppState) {
    let store = Arc::new(MemoryUserStore::new());

    let state = AppState {
        users: store.clone(),
        jwt_config: JwtConfig {
            secret: TEST_SECRET.to_string(),
            session_token_expiry: 21600,
        },
        email_config: EmailConfig {
            enabled: false,
            smtp_host: "localhost".to_string(),
            smtp_port: 1025,
            smtp_username: String::new(),
            smtp_password: String::new(),
            from_email: "noreply@inkshelf.example".to_string(),
            from_name: "Inkshelf".to_string(),
            frontend_url: "http://localhost:5173".to_string(),
        },
        cors_config: CorsConfig {
            allowed_origins: vec!["http://localhost:5173".to_string()],
        },
    };

    (store, state)
}

pub async fn send(app: &Router, request: Request<Body>) -> Response<Body> {
    app.clone().oneshot(request).await.unwrap()
}

pub fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

pub fn get_with_token(uri: &str, token: &str) -> Request<Body> {
    Request::builder()
        .uri(uri)
        .header(header::AUTHORIZATION, format!("Bearer {}", token))
        .body(Body::empty())
        .unwrap()
}

pub fn post_json(uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(serde_json::to_vec(&body).unwrap()))
        .unwrap()
}

pub async fn body_json(response: Response<Body>) -> Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}
