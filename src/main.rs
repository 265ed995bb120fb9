// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Family Accounts API Server
//!
//! Registers users by mobile phone, issues bearer tokens and stores one
//! family-memory profile per user.

use family_accounts::{config::Config, services::BcryptJwtScheme, AppState};
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load configuration from environment
    let config = Config::from_env()?;

    init_logging(config.debug);
    tracing::info!(
        port = config.port,
        debug = config.debug,
        token_minutes = config.access_token_expire_minutes,
        "Starting Family Accounts API"
    );

    let auth = Arc::new(BcryptJwtScheme::from_config(&config));

    // Open both record stores
    let state = Arc::new(AppState::build(config.clone(), auth).await?);
    tracing::info!(
        users = %config.users_file.display(),
        profiles = %config.profiles_file.display(),
        "Record stores ready"
    );

    // Build router
    let app = family_accounts::routes::create_router(state);

    // Start server
    let addr = format!("0.0.0.0:{}", config.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!(address = %addr, "Server listening");

    axum::serve(listener, app).await?;
    Ok(())
}

/// Initialize logging: JSON in production, compact text in debug mode.
///
/// `RUST_LOG` overrides the default filter.
fn init_logging(debug: bool) {
    let default_filter = if debug {
        "family_accounts=debug,tower_http=debug,info"
    } else {
        "info"
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));

    let registry = tracing_subscriber::registry().with(filter);

    if debug {
        registry
            .with(tracing_subscriber::fmt::layer().compact())
            .init();
    } else {
        registry
            .with(
                tracing_subscriber::fmt::layer()
                    .json()
                    .with_target(false)
                    .with_current_span(true)
                    .flatten_event(true),
            )
            .init();
    }
}
