#![allow(dead_code)]

use std::sync::Arc;

use axum::Router;
use axum::body::Body;
use axum::body::Bytes;
use axum::http::{HeaderMap, Method, Request, StatusCode, header};
use edunova::config::ServerConfig;
use edunova::services::ensure_default_admin;
use edunova::state::AppState;
use edunova::{api, db};
use http_body_util::BodyExt;
use serde_json::{Value, json};
use tower::ServiceExt;

pub const ADMIN_PASSWORD: &str = "admin123";

pub async fn test_state() -> AppState {
    test_state_with(ServerConfig::for_tests()).await
}

pub async fn test_state_with(config: ServerConfig) -> AppState {
    let pool = db::connect(&config.database_url)
        .await
        .expect("Failed to open in-memory database");
    db::run_migrations(&pool)
        .await
        .expect("Failed to run migrations");
    ensure_default_admin(&pool, ADMIN_PASSWORD)
        .await
        .expect("Failed to seed admin");

    AppState {
        db: pool,
        config: Arc::new(config),
    }
}

pub async fn test_app() -> Router {
    api::app(test_state().await)
}

pub async fn send(
    app: &Router,
    method: Method,
    uri: &str,
    token: Option<&str>,
    body: Option<Value>,
) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
    }
    let request = match body {
        Some(body) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string())),
        None => builder.body(Body::empty()),
    }
    .expect("Failed to build request");

    let response = app
        .clone()
        .oneshot(request)
        .await
        .expect("Request failed");
    let status = response.status();
    let bytes = response
        .into_body()
        .collect()
        .await
        .expect("Failed to read body")
        .to_bytes();
    let value = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, value)
}

/// Sends a prebuilt request and returns status, headers and the raw body.
pub async fn send_raw(app: &Router, request: Request<Body>) -> (StatusCode, HeaderMap, Bytes) {
    let response = app
        .clone()
        .oneshot(request)
        .await
        .expect("Request failed");
    let status = response.status();
    let headers = response.headers().clone();
    let bytes = response
        .into_body()
        .collect()
        .await
        .expect("Failed to read body")
        .to_bytes();
    (status, headers, bytes)
}

pub async fn get(app: &Router, uri: &str, token: Option<&str>) -> (StatusCode, Value) {
    send(app, Method::GET, uri, token, None).await
}

pub async fn post_json(app: &Router, uri: &str, token: Option<&str>, body: Value) -> (StatusCode, Value) {
    send(app, Method::POST, uri, token, Some(body)).await
}

pub async fn put_json(app: &Router, uri: &str, token: Option<&str>, body: Value) -> (StatusCode, Value) {
    send(app, Method::PUT, uri, token, Some(body)).await
}

pub async fn delete(app: &Router, uri: &str, token: Option<&str>) -> (StatusCode, Value) {
    send(app, Method::DELETE, uri, token, None).await
}

/// Logs in as the seeded admin and returns the bearer token.
pub async fn login(app: &Router) -> String {
    let (status, body) = post_json(
        app,
        "/api/admin/login",
        None,
        json!({ "username": "admin", "password": ADMIN_PASSWORD }),
    )
    .await;
    assert_eq!(status, StatusCode::OK, "login failed: {body}");
    body["token"]
        .as_str()
        .expect("token missing from login response")
        .to_string()
}
