// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

use axum::{
    body::Body,
    http::{header, Request, StatusCode},
    Router,
};
use family_accounts::config::Config;
use family_accounts::routes::create_router;
use family_accounts::services::{AuthScheme, BcryptJwtScheme};
use family_accounts::AppState;
use serde_json::Value;
use std::sync::Arc;
use tempfile::TempDir;
use tower::ServiceExt;

/// Router plus the state behind it. The record files live in `_dir`,
/// which is removed when the app is dropped.
#[allow(dead_code)]
pub struct TestApp {
    pub router: Router,
    pub state: Arc<AppState>,
    _dir: TempDir,
}

/// Test config with record files in `dir` and a cheap bcrypt cost.
#[allow(dead_code)]
pub fn test_config(dir: &TempDir) -> Config {
    Config {
        users_file: dir.path().join("user_details.json"),
        profiles_file: dir.path().join("user_profile.json"),
        bcrypt_cost: 4,
        ..Config::test_default()
    }
}

/// Create a test app backed by fresh, empty record files.
#[allow(dead_code)]
pub async fn create_test_app() -> TestApp {
    create_test_app_with(|config| config).await
}

/// Create a test app after adjusting the test config.
#[allow(dead_code)]
pub async fn create_test_app_with(adjust: impl FnOnce(Config) -> Config) -> TestApp {
    let dir = tempfile::tempdir().expect("Failed to create temp dir");
    let config = adjust(test_config(&dir));
    let auth: Arc<dyn AuthScheme> = Arc::new(BcryptJwtScheme::from_config(&config));

    let state = Arc::new(
        AppState::build(config, auth)
            .await
            .expect("Failed to open record stores"),
    );

    TestApp {
        router: create_router(state.clone()),
        state,
        _dir: dir,
    }
}

/// Build a JSON request, optionally with a bearer token.
#[allow(dead_code)]
pub fn json_request(method: &str, uri: &str, token: Option<&str>, body: Value) -> Request<Body> {
    let mut builder = Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json");
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
    }
    builder.body(Body::from(body.to_string())).unwrap()
}

/// Build a body-less request, optionally with a bearer token.
#[allow(dead_code)]
pub fn empty_request(method: &str, uri: &str, token: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
    }
    builder.body(Body::empty()).unwrap()
}

/// Send a request and decode the JSON body (`Value::Null` if empty).
#[allow(dead_code)]
pub async fn send(app: &TestApp, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.router.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or(Value::Null)
    };
    (status, body)
}

/// Register a user through the API and return the response body.
#[allow(dead_code)]
pub async fn register(app: &TestApp, phone: &str, email: &str, password: &str) -> Value {
    let (status, body) = send(
        app,
        json_request(
            "POST",
            "/api/v1/users/",
            None,
            serde_json::json!({
                "mobile_phone": phone,
                "email": email,
                "name": "Test User",
                "password": password,
            }),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK, "registration failed: {body}");
    body
}

/// Log in through the form endpoint and return the access token.
#[allow(dead_code)]
pub async fn login(app: &TestApp, phone: &str, password: &str) -> String {
    let (status, body) = send(app, login_request(phone, password)).await;
    assert_eq!(status, StatusCode::OK, "login failed: {body}");
    body["access_token"].as_str().unwrap().to_string()
}

#[allow(dead_code)]
pub fn login_request(phone: &str, password: &str) -> Request<Body> {
    let form = format!(
        "grant_type=password&username={}&password={}",
        phone.replace('+', "%2B"),
        password
    );
    Request::builder()
        .method("POST")
        .uri("/api/v1/token")
        .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
        .body(Body::from(form))
        .unwrap()
}

/// Register and log in, returning the token.
#[allow(dead_code)]
pub async fn register_and_login(app: &TestApp, phone: &str, email: &str) -> String {
    register(app, phone, email, "secret1").await;
    login(app, phone, "secret1").await
}

/// A complete, valid profile body.
#[allow(dead_code)]
pub fn profile_body() -> Value {
    serde_json::json!({
        "father": {
            "first_name": "John",
            "last_name": "Smith",
            "birth_year": 1980,
            "birth_month": 6,
            "birth_day": 15
        },
        "mother": {
            "first_name": "Jane",
            "middle_name": "Ann",
            "last_name": "Smith",
            "birth_year": 1982,
            "birth_month": 3,
            "birth_day": 2
        },
        "child": {
            "first_name": "Lily",
            "last_name": "Smith",
            "gender": "female",
            "birth_year": 2018,
            "birth_month": 11,
            "birth_day": 30
        }
    })
}
