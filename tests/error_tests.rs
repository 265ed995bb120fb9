// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

use axum::{
    http::{header, StatusCode},
    response::IntoResponse,
};
use family_accounts::db::StoreError;
use family_accounts::error::AppError;
use family_accounts::services::AuthError;
use serde_json::Value;

async fn render(err: AppError) -> (StatusCode, Option<String>, Value) {
    let response = err.into_response();
    let status = response.status();
    let www_authenticate = response
        .headers()
        .get(header::WWW_AUTHENTICATE)
        .map(|v| v.to_str().unwrap().to_string());
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    (status, www_authenticate, serde_json::from_slice(&bytes).unwrap())
}

#[tokio::test]
async fn test_auth_errors_are_401_with_challenge() {
    for err in [
        AppError::Unauthorized,
        AppError::InvalidToken,
        AppError::InvalidCredentials,
    ] {
        let (status, challenge, _) = render(err).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(challenge.as_deref(), Some("Bearer"));
    }
}

#[tokio::test]
async fn test_invalid_credentials_message() {
    let (_, _, body) = render(AppError::InvalidCredentials).await;

    assert_eq!(body["error"], "invalid_credentials");
    assert_eq!(body["details"], "Incorrect mobile phone number or password");
}

#[tokio::test]
async fn test_client_errors_carry_details() {
    let (status, challenge, body) = render(AppError::NotFound("User not found".into())).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(challenge, None);
    assert_eq!(body["details"], "User not found");

    let (status, _, body) = render(AppError::Validation("email: bad".into())).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "validation_error");

    let (status, _, body) = render(AppError::BadRequest("nope".into())).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "bad_request");
}

#[tokio::test]
async fn test_server_errors_hide_details() {
    let (status, _, body) = render(AppError::Storage("disk on fire".into())).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert!(body.get("details").is_none());

    let (status, _, body) = render(AppError::Internal(anyhow::anyhow!("boom"))).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["error"], "internal_error");
    assert!(body.get("details").is_none());
}

#[tokio::test]
async fn test_store_error_conversion() {
    let err: AppError = StoreError::Duplicate("User with this email already exists".into()).into();
    let (status, _, body) = render(err).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "duplicate");
    assert_eq!(body["details"], "User with this email already exists");

    let err: AppError = StoreError::Corrupt {
        path: "user_details.txt".into(),
        reason: "expected value".into(),
    }
    .into();
    assert!(matches!(err, AppError::Storage(_)));
}

#[test]
fn test_auth_error_conversion() {
    let err: AppError = AuthError::InvalidToken.into();
    assert!(matches!(err, AppError::InvalidToken));

    let err: AppError = AuthError::Hash("cost out of range".into()).into();
    assert!(matches!(err, AppError::Internal(_)));
}
