// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Profile routes, always scoped to the authenticated user.

use axum::{
    extract::State,
    routing::{get, post},
    Extension, Json, Router,
};
use axum_extra::extract::WithRejection;
use std::sync::Arc;
use validator::Validate;

use super::MessageResponse;
use crate::error::{AppError, Result};
use crate::middleware::AuthUser;
use crate::models::{Profile, ProfileCreate, ProfileUpdate};
use crate::AppState;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/profile/", post(create_profile))
        .route(
            "/profile/me",
            get(get_profile).put(update_profile).delete(delete_profile),
        )
}

fn not_found() -> AppError {
    AppError::NotFound("Profile not found".to_string())
}

async fn create_profile(
    State(state): State<Arc<AppState>>,
    Extension(AuthUser(user)): Extension<AuthUser>,
    WithRejection(Json(request), _): WithRejection<Json<ProfileCreate>, AppError>,
) -> Result<Json<Profile>> {
    request.validate()?;

    let profile = state.profiles.create(&user.id, request).await?;
    Ok(Json(profile))
}

async fn get_profile(
    State(state): State<Arc<AppState>>,
    Extension(AuthUser(user)): Extension<AuthUser>,
) -> Result<Json<Profile>> {
    let profile = state.profiles.get(&user.id).await?.ok_or_else(not_found)?;
    Ok(Json(profile))
}

async fn update_profile(
    State(state): State<Arc<AppState>>,
    Extension(AuthUser(user)): Extension<AuthUser>,
    WithRejection(Json(update), _): WithRejection<Json<ProfileUpdate>, AppError>,
) -> Result<Json<Profile>> {
    update.validate()?;

    let profile = state
        .profiles
        .update(&user.id, update)
        .await?
        .ok_or_else(not_found)?;
    Ok(Json(profile))
}

async fn delete_profile(
    State(state): State<Arc<AppState>>,
    Extension(AuthUser(user)): Extension<AuthUser>,
) -> Result<Json<MessageResponse>> {
    if !state.profiles.delete(&user.id).await? {
        return Err(not_found());
    }
    Ok(MessageResponse::new("Profile deleted successfully"))
}
