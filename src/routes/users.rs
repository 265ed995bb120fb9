// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! User account routes.

use axum::{
    extract::{Path, Query, State},
    routing::{get, post},
    Extension, Json, Router,
};
use axum_extra::extract::WithRejection;
use serde::Deserialize;
use std::sync::Arc;
use validator::Validate;

use super::MessageResponse;
use crate::error::{AppError, Result};
use crate::middleware::AuthUser;
use crate::models::{UserCreate, UserResponse, UserUpdate};
use crate::AppState;

const DEFAULT_LIMIT: usize = 100;

/// Registration, open to anyone.
pub fn public_routes() -> Router<Arc<AppState>> {
    Router::new().route("/users/", post(create_user))
}

/// Account routes (require authentication via bearer token).
/// The auth middleware is applied in routes/mod.rs for these routes.
pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/users/", get(list_users))
        .route("/users/me", get(get_me))
        .route(
            "/users/{mobile_phone}",
            get(get_user).put(update_user).delete(delete_user),
        )
}

fn not_found() -> AppError {
    AppError::NotFound("User not found".to_string())
}

/// Register a new user.
async fn create_user(
    State(state): State<Arc<AppState>>,
    WithRejection(Json(request), _): WithRejection<Json<UserCreate>, AppError>,
) -> Result<Json<UserResponse>> {
    request.validate()?;

    let user = state.users.create(request).await?;
    Ok(Json(user.into()))
}

/// Get the authenticated user.
async fn get_me(Extension(AuthUser(user)): Extension<AuthUser>) -> Json<UserResponse> {
    Json(user.into())
}

async fn get_user(
    State(state): State<Arc<AppState>>,
    Path(mobile_phone): Path<String>,
) -> Result<Json<UserResponse>> {
    let user = state
        .users
        .get_by_phone(&mobile_phone)
        .await?
        .ok_or_else(not_found)?;
    Ok(Json(user.into()))
}

async fn update_user(
    State(state): State<Arc<AppState>>,
    Extension(AuthUser(caller)): Extension<AuthUser>,
    Path(mobile_phone): Path<String>,
    WithRejection(Json(update), _): WithRejection<Json<UserUpdate>, AppError>,
) -> Result<Json<UserResponse>> {
    update.validate()?;

    tracing::debug!(
        caller = %caller.id,
        target = %mobile_phone,
        "Updating user"
    );

    let user = state
        .users
        .update(&mobile_phone, update)
        .await?
        .ok_or_else(not_found)?;
    Ok(Json(user.into()))
}

async fn delete_user(
    State(state): State<Arc<AppState>>,
    Extension(AuthUser(caller)): Extension<AuthUser>,
    Path(mobile_phone): Path<String>,
) -> Result<Json<MessageResponse>> {
    tracing::info!(caller = %caller.id, target = %mobile_phone, "Deleting user");

    if !state.users.delete(&mobile_phone).await? {
        return Err(not_found());
    }
    Ok(MessageResponse::new("User deleted successfully"))
}

#[derive(Deserialize)]
struct ListQuery {
    #[serde(default)]
    skip: usize,
    #[serde(default = "default_limit")]
    limit: usize,
}

fn default_limit() -> usize {
    DEFAULT_LIMIT
}

/// List users, `skip` then at most `limit`.
async fn list_users(
    State(state): State<Arc<AppState>>,
    WithRejection(Query(params), _): WithRejection<Query<ListQuery>, AppError>,
) -> Result<Json<Vec<UserResponse>>> {
    tracing::debug!(skip = params.skip, limit = params.limit, "Listing users");

    let users = state.users.list(params.skip, params.limit).await?;
    Ok(Json(users.into_iter().map(UserResponse::from).collect()))
}
