#![allow(dead_code)]

use std::sync::Arc;

use axum::body::Body;
use axum::http::{header, HeaderMap, Method, Request, StatusCode};
use axum::Router;
use chrono::{DateTime, Duration, Utc};
use lostfound_api::middleware::auth::{issue_token, ADMIN_ROLE};
use lostfound_api::{build_app, AppConfig, AppState};
use lostfound_core::events::EventBus;
use lostfound_core::store::MemoryDocumentStore;
use serde_json::{json, Value};
use tower::ServiceExt;

pub const SECRET: &str = "test-secret";

pub fn app() -> (Router, AppState) {
    app_with(AppConfig::default())
}

pub fn app_with(config: AppConfig) -> (Router, AppState) {
    let config = AppConfig {
        jwt_secret: SECRET.to_string(),
        ..config
    };
    let state = AppState::new(
        Arc::new(MemoryDocumentStore::new()),
        config,
        EventBus::new(16),
    );
    (build_app(state.clone()), state)
}

pub fn admin_token() -> String {
    issue_token(SECRET, "admin@campus.edu", Some(ADMIN_ROLE), Duration::hours(1)).unwrap()
}

pub fn user_token() -> String {
    issue_token(SECRET, "student@campus.edu", None, Duration::hours(1)).unwrap()
}

pub struct TestResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub text: String,
}

impl TestResponse {
    pub fn json(&self) -> Value {
        serde_json::from_str(&self.text).unwrap_or(Value::Null)
    }
}

pub async fn send(app: &Router, request: Request<Body>) -> TestResponse {
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let headers = response.headers().clone();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    TestResponse {
        status,
        headers,
        text: String::from_utf8(bytes.to_vec()).unwrap(),
    }
}

pub fn request(method: Method, uri: &str, token: Option<&str>, body: Option<Value>) -> Request<Body> {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
    }
    match body {
        Some(body) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    }
}

pub async fn put(app: &Router, key: &str, data: Value) -> TestResponse {
    send(
        app,
        request(Method::POST, "/api/storage", None, Some(json!({"key": key, "data": data}))),
    )
    .await
}

pub async fn get(app: &Router, uri: &str) -> TestResponse {
    send(app, request(Method::GET, uri, None, None)).await
}

pub fn item_doc(id: &str, kind: &str, category: &str, email: &str, date: DateTime<Utc>) -> Value {
    json!({
        "id": id,
        "name": format!("{category} {kind}"),
        "type": kind,
        "category": category,
        "description": "seen near the fountain",
        "location": "Main quad",
        "contactEmail": email,
        "image": null,
        "status": "unclaimed",
        "date": date,
        "messages": []
    })
}
