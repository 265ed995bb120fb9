//! Application configuration loaded from environment variables.
//!
//! A `.env` file in the working directory is read first if present, so
//! local development can keep its settings there.

use jsonwebtoken::Algorithm;
use std::env;
use std::path::PathBuf;

const DEFAULT_CORS_ORIGINS: &str = "http://localhost:3000,http://localhost:8080";

/// Longest accepted token lifetime: one year.
const MAX_TOKEN_EXPIRE_MINUTES: i64 = 60 * 24 * 365;

/// Application configuration, loaded once at startup.
#[derive(Debug, Clone)]
pub struct Config {
    // --- Token signing ---
    /// JWT signing secret (raw bytes)
    pub secret_key: Vec<u8>,
    /// JWT signing algorithm (HMAC family only)
    pub algorithm: Algorithm,
    /// Lifetime of issued access tokens, in minutes
    pub access_token_expire_minutes: i64,
    /// bcrypt work factor for password hashes
    pub bcrypt_cost: u32,

    // --- HTTP ---
    /// Origins allowed to make cross-origin requests
    pub cors_origins: Vec<String>,
    /// Debug mode: readable logs and any localhost origin
    pub debug: bool,
    /// Server port
    pub port: u16,

    // --- Storage ---
    /// JSON file holding user records
    pub users_file: PathBuf,
    /// JSON file holding profile records
    pub profiles_file: PathBuf,
}

impl Config {
    /// Default config for testing only.
    pub fn test_default() -> Self {
        Self {
            secret_key: b"test_secret_key_32_bytes_minimum!".to_vec(),
            algorithm: Algorithm::HS256,
            access_token_expire_minutes: 30,
            bcrypt_cost: bcrypt::DEFAULT_COST,
            cors_origins: vec!["http://localhost:3000".to_string()],
            debug: false,
            port: 8000,
            users_file: PathBuf::from("user_details.txt"),
            profiles_file: PathBuf::from("user_profile.txt"),
        }
    }

    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok(); // Load .env file if present

        let secret_key = env::var("SECRET_KEY")
            .map(|v| v.trim().to_string())
            .map_err(|_| ConfigError::Missing("SECRET_KEY"))?;
        if secret_key.is_empty() {
            return Err(ConfigError::Invalid("SECRET_KEY", "must not be empty".to_string()));
        }

        let algorithm =
            parse_algorithm(&env::var("ALGORITHM").unwrap_or_else(|_| "HS256".to_string()))?;

        let access_token_expire_minutes = match env::var("ACCESS_TOKEN_EXPIRE_MINUTES") {
            Ok(raw) => parse_token_minutes(&raw)?,
            Err(_) => 30,
        };

        let bcrypt_cost = match env::var("BCRYPT_COST") {
            Ok(raw) => raw
                .trim()
                .parse::<u32>()
                .ok()
                .filter(|cost| (4..=31).contains(cost))
                .ok_or_else(|| ConfigError::Invalid("BCRYPT_COST", raw.clone()))?,
            Err(_) => bcrypt::DEFAULT_COST,
        };

        let cors_origins = parse_origins(
            &env::var("CORS_ORIGINS").unwrap_or_else(|_| DEFAULT_CORS_ORIGINS.to_string()),
        );

        Ok(Self {
            secret_key: secret_key.into_bytes(),
            algorithm,
            access_token_expire_minutes,
            bcrypt_cost,
            cors_origins,
            debug: env::var("DEBUG").map(|v| parse_bool(&v)).unwrap_or(false),
            port: env::var("PORT")
                .unwrap_or_else(|_| "8000".to_string())
                .parse()
                .unwrap_or(8000),
            users_file: env::var("USERS_FILE")
                .unwrap_or_else(|_| "user_details.txt".to_string())
                .into(),
            profiles_file: env::var("PROFILES_FILE")
                .unwrap_or_else(|_| "user_profile.txt".to_string())
                .into(),
        })
    }

    /// Token lifetime as a duration. Out-of-range values saturate.
    pub fn token_lifetime(&self) -> chrono::Duration {
        chrono::Duration::try_minutes(self.access_token_expire_minutes).unwrap_or(
            if self.access_token_expire_minutes < 0 {
                chrono::Duration::MIN
            } else {
                chrono::Duration::MAX
            },
        )
    }
}

/// Token lifetime in minutes, between one minute and one year.
fn parse_token_minutes(raw: &str) -> Result<i64, ConfigError> {
    raw.trim()
        .parse::<i64>()
        .ok()
        .filter(|minutes| (1..=MAX_TOKEN_EXPIRE_MINUTES).contains(minutes))
        .ok_or_else(|| ConfigError::Invalid("ACCESS_TOKEN_EXPIRE_MINUTES", raw.to_string()))
}

/// Only HMAC algorithms make sense with a shared secret key.
fn parse_algorithm(raw: &str) -> Result<Algorithm, ConfigError> {
    match raw.trim().to_ascii_uppercase().as_str() {
        "HS256" => Ok(Algorithm::HS256),
        "HS384" => Ok(Algorithm::HS384),
        "HS512" => Ok(Algorithm::HS512),
        _ => Err(ConfigError::Invalid("ALGORITHM", raw.to_string())),
    }
}

/// Parse a comma-separated origin list, dropping blanks and trailing slashes.
fn parse_origins(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(|origin| origin.trim().trim_end_matches('/'))
        .filter(|origin| !origin.is_empty())
        .map(str::to_string)
        .collect()
}

fn parse_bool(raw: &str) -> bool {
    matches!(
        raw.trim().to_ascii_lowercase().as_str(),
        "1" | "true" | "yes" | "on"
    )
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    Missing(&'static str),

    #[error("Invalid value for {0}: {1}")]
    Invalid(&'static str, String),
}
