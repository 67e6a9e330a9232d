#![allow(dead_code)]

use std::sync::Arc;

use axum::body::Body;
use axum::http::{Method, Request, Response};
use axum::Router;
use chrono::NaiveDate;
use clubcare_core::checks::CheckEngine;
use clubcare_core::clock::FixedClock;
use clubcare_core::store::MemoryCheckStore;
use clubcare_core::types::DbId;
use http_body_util::BodyExt;
use serde_json::Value;
use tower::ServiceExt;

use clubcare_api::auth::jwt::{generate_access_token, JwtConfig};
use clubcare_api::config::ServerConfig;
use clubcare_api::router::build_app_router;
use clubcare_api::state::AppState;

/// Date every test app treats as "today".
pub fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 6, 1).unwrap()
}

/// Build a test `ServerConfig` with safe defaults.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        database_max_connections: 1,
        jwt: JwtConfig {
            secret: "test-secret-that-is-long-enough-for-hmac".to_string(),
            access_token_expiry_mins: 15,
        },
    }
}

/// Application router plus a handle on its backing store for failure
/// injection.
pub struct TestApp {
    pub router: Router,
    pub store: Arc<MemoryCheckStore>,
}

/// Build the full application router over an in-memory store and a clock
/// pinned to [`today`].
pub fn build_test_app() -> TestApp {
    let config = test_config();
    let store = Arc::new(MemoryCheckStore::new());
    let engine = CheckEngine::new(store.clone(), Arc::new(FixedClock(today())));
    let state = AppState {
        engine,
        config: Arc::new(config.clone()),
    };
    TestApp {
        router: build_app_router(state, &config),
        store,
    }
}

/// Signed access token for a user with the given role.
pub fn token(user_id: DbId, role: &str, clubs: Option<Vec<DbId>>) -> String {
    generate_access_token(
        user_id,
        &format!("{role} {user_id}"),
        role,
        clubs,
        &test_config().jwt,
    )
    .unwrap()
}

pub fn admin() -> String {
    token(1, "admin", None)
}

pub fn manager() -> String {
    token(2, "manager", None)
}

pub fn technician() -> String {
    token(3, "technician", None)
}

pub fn viewer() -> String {
    token(4, "viewer", None)
}

pub async fn send(
    app: &Router,
    method: Method,
    uri: &str,
    token: Option<&str>,
    body: Option<Value>,
) -> Response<Body> {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header("Authorization", format!("Bearer {token}"));
    }
    let request = match body {
        Some(json) => builder
            .header("Content-Type", "application/json")
            .body(Body::from(json.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };
    app.clone().oneshot(request).await.unwrap()
}

pub async fn get(app: &Router, uri: &str, token: &str) -> Response<Body> {
    send(app, Method::GET, uri, Some(token), None).await
}

pub async fn post_json(app: &Router, uri: &str, token: &str, body: Value) -> Response<Body> {
    send(app, Method::POST, uri, Some(token), Some(body)).await
}

pub async fn put_json(app: &Router, uri: &str, token: &str, body: Value) -> Response<Body> {
    send(app, Method::PUT, uri, Some(token), Some(body)).await
}

pub async fn delete(app: &Router, uri: &str, token: &str) -> Response<Body> {
    send(app, Method::DELETE, uri, Some(token), None).await
}

/// Collect a response body and parse it as JSON.
pub async fn body_json(response: Response<Body>) -> Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

/// JSON body for a new check due `due` with the given checklist labels.
pub fn check_body(club_id: DbId, due: &str, labels: &[&str]) -> Value {
    let checklist: Vec<Value> = labels
        .iter()
        .map(|label| serde_json::json!({ "label": label }))
        .collect();
    serde_json::json!({
        "club_id": club_id,
        "title": "Fire extinguishers",
        "space": "Lobby",
        "trade": "fire_safety",
        "frequency_months": 12,
        "next_due_date": due,
        "checklist": checklist,
    })
}

/// Create a check as a manager and return its JSON representation.
pub async fn create_check(app: &Router, club_id: DbId, due: &str, labels: &[&str]) -> Value {
    let response = post_json(app, "/api/v1/checks", &manager(), check_body(club_id, due, labels)).await;
    assert_eq!(response.status(), 201);
    body_json(response).await["data"].clone()
}
