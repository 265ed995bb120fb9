// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Family accounts: user registration, bearer-token login and
//! family-memory profiles.
//!
//! This crate provides the backend API. Users are keyed by mobile phone
//! number; each user may own one profile describing a parent/child/pet
//! unit. Records live in flat JSON files.

pub mod config;
pub mod db;
pub mod error;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod services;

use config::Config;
use db::{ProfileStore, UserStore};
use services::AuthScheme;
use std::sync::Arc;

/// Shared application state.
pub struct AppState {
    pub config: Config,
    pub auth: Arc<dyn AuthScheme>,
    pub users: UserStore,
    pub profiles: ProfileStore,
}

impl AppState {
    /// Open both stores at the configured paths and build the state.
    pub async fn build(config: Config, auth: Arc<dyn AuthScheme>) -> Result<Self, db::StoreError> {
        let users = UserStore::open(&config.users_file, auth.clone()).await?;
        let profiles = ProfileStore::open(&config.profiles_file).await?;

        Ok(Self {
            config,
            auth,
            users,
            profiles,
        })
    }
}
