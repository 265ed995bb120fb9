// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Password hashing and bearer token issuance.
//!
//! Callers only see the [`AuthScheme`] capability; the bcrypt + JWT
//! implementation can be swapped without touching routes or stores.

use crate::config::Config;
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// JWT claims structure.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct Claims {
    /// Subject (user's mobile phone number)
    pub sub: String,
    /// Expiration time (Unix timestamp)
    pub exp: i64,
    /// Issued at (Unix timestamp)
    pub iat: i64,
}

/// Password and token operations needed by the API.
pub trait AuthScheme: Send + Sync {
    /// Hash a plaintext password for storage.
    fn hash_password(&self, password: &str) -> Result<String, AuthError>;

    /// Check a plaintext password against a stored hash.
    ///
    /// A malformed hash never verifies.
    fn verify_password(&self, password: &str, hashed: &str) -> bool;

    /// Issue a signed token for `subject`, valid for the configured lifetime.
    fn issue_token(&self, subject: &str) -> Result<String, AuthError>;

    /// Decode and verify a token.
    ///
    /// Bad signatures, expired tokens and garbage all yield
    /// [`AuthError::InvalidToken`].
    fn decode_token(&self, token: &str) -> Result<Claims, AuthError>;
}

/// bcrypt password hashes with HMAC-signed JWTs.
pub struct BcryptJwtScheme {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    algorithm: Algorithm,
    token_lifetime: chrono::Duration,
    cost: u32,
}

impl BcryptJwtScheme {
    pub fn new(
        secret: &[u8],
        algorithm: Algorithm,
        token_lifetime: chrono::Duration,
        cost: u32,
    ) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(secret),
            decoding_key: DecodingKey::from_secret(secret),
            algorithm,
            token_lifetime,
            cost,
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(
            &config.secret_key,
            config.algorithm,
            config.token_lifetime(),
            config.bcrypt_cost,
        )
    }
}

impl AuthScheme for BcryptJwtScheme {
    fn hash_password(&self, password: &str) -> Result<String, AuthError> {
        bcrypt::hash(password, self.cost).map_err(|e| AuthError::Hash(e.to_string()))
    }

    fn verify_password(&self, password: &str, hashed: &str) -> bool {
        bcrypt::verify(password, hashed).unwrap_or(false)
    }

    fn issue_token(&self, subject: &str) -> Result<String, AuthError> {
        let now = chrono::Utc::now();
        let expires = now
            .checked_add_signed(self.token_lifetime)
            .ok_or_else(|| AuthError::Token("token lifetime out of range".to_string()))?;
        let claims = Claims {
            sub: subject.to_string(),
            iat: now.timestamp(),
            exp: expires.timestamp(),
        };

        encode(&Header::new(self.algorithm), &claims, &self.encoding_key)
            .map_err(|e| AuthError::Token(e.to_string()))
    }

    fn decode_token(&self, token: &str) -> Result<Claims, AuthError> {
        let mut validation = Validation::new(self.algorithm);
        validation.leeway = 0;
        validation.set_required_spec_claims(&["exp", "sub"]);

        decode::<Claims>(token, &self.decoding_key, &validation)
            .map(|data| data.claims)
            .map_err(|e| {
                tracing::debug!(error = %e, "Token rejected");
                AuthError::InvalidToken
            })
    }
}

/// Hash on the blocking pool; bcrypt is deliberately slow.
pub async fn hash_password_blocking(
    scheme: Arc<dyn AuthScheme>,
    password: String,
) -> Result<String, AuthError> {
    tokio::task::spawn_blocking(move || scheme.hash_password(&password))
        .await
        .map_err(|e| AuthError::Hash(e.to_string()))?
}

/// Verify on the blocking pool. A panicked worker counts as a mismatch.
pub async fn verify_password_blocking(
    scheme: Arc<dyn AuthScheme>,
    password: String,
    hashed: String,
) -> bool {
    tokio::task::spawn_blocking(move || scheme.verify_password(&password, &hashed))
        .await
        .unwrap_or(false)
}

/// Errors from password and token operations.
#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    #[error("Password hashing failed: {0}")]
    Hash(String),

    #[error("Token creation failed: {0}")]
    Token(String),

    #[error("Invalid or expired token")]
    InvalidToken,
}
