// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! JWT authentication tests.
//!
//! These tests verify that tokens issued by the login endpoint are plain
//! HS256 JWTs that any standard decoder accepts, and that the middleware
//! accepts tokens minted outside the app with the same secret.

use axum::http::StatusCode;
use family_accounts::config::Config;
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

mod common;

use common::{create_test_app, empty_request, register_and_login, send};

/// Claims structure that must match what the middleware expects.
/// If the issued token format changes, these tests catch it.
#[derive(Debug, Serialize, Deserialize)]
struct Claims {
    sub: String,
    exp: i64,
    iat: i64,
}

fn now() -> i64 {
    chrono::Utc::now().timestamp()
}

fn signing_key() -> Vec<u8> {
    Config::test_default().secret_key
}

#[tokio::test]
async fn test_issued_token_decodes_with_standard_claims() {
    let app = create_test_app().await;
    let token = register_and_login(&app, "+15551234567", "a@b.com").await;

    let key = DecodingKey::from_secret(&signing_key());
    let validation = Validation::new(Algorithm::HS256);
    let token_data = decode::<Claims>(&token, &key, &validation)
        .expect("Failed to decode JWT - check Claims struct compatibility");

    assert_eq!(token_data.header.alg, Algorithm::HS256);
    assert_eq!(token_data.claims.sub, "+15551234567");
    assert!(token_data.claims.exp > token_data.claims.iat);
}

#[tokio::test]
async fn test_token_expires_after_configured_lifetime() {
    let app = create_test_app().await;
    let token = register_and_login(&app, "5551234567", "a@b.com").await;

    let key = DecodingKey::from_secret(&signing_key());
    let validation = Validation::new(Algorithm::HS256);
    let claims = decode::<Claims>(&token, &key, &validation).unwrap().claims;

    // Default lifetime is 30 minutes
    assert_eq!(claims.exp - claims.iat, 30 * 60);
    assert!((claims.iat - now()).abs() < 60);
}

#[tokio::test]
async fn test_externally_minted_token_accepted() {
    let app = create_test_app().await;
    register_and_login(&app, "5551234567", "a@b.com").await;

    let claims = Claims {
        sub: "5551234567".to_string(),
        exp: now() + 600,
        iat: now(),
    };
    let token = encode(
        &Header::new(Algorithm::HS256),
        &claims,
        &EncodingKey::from_secret(&signing_key()),
    )
    .unwrap();

    let (status, me) = send(&app, empty_request("GET", "/api/v1/users/me", Some(&token))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(me["mobile_phone"], "5551234567");
}

#[tokio::test]
async fn test_token_signed_with_other_secret_rejected() {
    let app = create_test_app().await;
    register_and_login(&app, "5551234567", "a@b.com").await;

    let claims = Claims {
        sub: "5551234567".to_string(),
        exp: now() + 600,
        iat: now(),
    };
    let token = encode(
        &Header::new(Algorithm::HS256),
        &claims,
        &EncodingKey::from_secret(b"some_other_secret_entirely!!"),
    )
    .unwrap();

    let (status, body) = send(&app, empty_request("GET", "/api/v1/users/me", Some(&token))).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["error"], "invalid_token");
}

#[tokio::test]
async fn test_token_with_other_algorithm_rejected() {
    let app = create_test_app().await;
    register_and_login(&app, "5551234567", "a@b.com").await;

    let claims = Claims {
        sub: "5551234567".to_string(),
        exp: now() + 600,
        iat: now(),
    };
    let token = encode(
        &Header::new(Algorithm::HS512),
        &claims,
        &EncodingKey::from_secret(&signing_key()),
    )
    .unwrap();

    let (status, _) = send(&app, empty_request("GET", "/api/v1/users/me", Some(&token))).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_token_for_unknown_subject_rejected() {
    let app = create_test_app().await;

    let claims = Claims {
        sub: "5559999999".to_string(),
        exp: now() + 600,
        iat: now(),
    };
    let token = encode(
        &Header::new(Algorithm::HS256),
        &claims,
        &EncodingKey::from_secret(&signing_key()),
    )
    .unwrap();

    let (status, _) = send(&app, empty_request("GET", "/api/v1/users/me", Some(&token))).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_configured_algorithm_is_used() {
    let app = common::create_test_app_with(|config| Config {
        algorithm: Algorithm::HS384,
        ..config
    })
    .await;
    let token = register_and_login(&app, "5551234567", "a@b.com").await;

    let header = jsonwebtoken::decode_header(&token).unwrap();
    assert_eq!(header.alg, Algorithm::HS384);

    let (status, _) = send(&app, empty_request("GET", "/api/v1/users/me", Some(&token))).await;
    assert_eq!(status, StatusCode::OK);
}
