// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Login, password reset and account lookup routes.

use axum::{
    body::Bytes,
    extract::{Query, State},
    routing::post,
    Form, Json, Router,
};
use axum_extra::extract::WithRejection;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
#[cfg(feature = "binding-generation")]
use ts_rs::TS;
use validator::Validate;

use super::MessageResponse;
use crate::error::{AppError, Result};
use crate::models::PasswordReset;
use crate::AppState;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/token", post(login))
        .route("/reset-password", post(reset_password))
        .route("/check-user", post(check_user))
}

/// OAuth2 password-grant form. Extra fields such as `grant_type` are ignored.
#[derive(Deserialize)]
pub struct LoginForm {
    /// Mobile phone number
    username: String,
    password: String,
}

#[derive(Serialize, Deserialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct TokenResponse {
    pub access_token: String,
    pub token_type: String,
}

/// Exchange phone + password for a bearer token.
async fn login(
    State(state): State<Arc<AppState>>,
    WithRejection(Form(form), _): WithRejection<Form<LoginForm>, AppError>,
) -> Result<Json<TokenResponse>> {
    let user = state
        .users
        .authenticate(&form.username, &form.password)
        .await?
        .ok_or_else(|| {
            tracing::info!(mobile_phone = %form.username, "Login failed");
            AppError::InvalidCredentials
        })?;

    let access_token = state.auth.issue_token(&user.mobile_phone)?;

    tracing::info!(user_id = %user.id, "Login succeeded");

    Ok(Json(TokenResponse {
        access_token,
        token_type: "bearer".to_string(),
    }))
}

/// Replace a user's password.
async fn reset_password(
    State(state): State<Arc<AppState>>,
    WithRejection(Json(request), _): WithRejection<Json<PasswordReset>, AppError>,
) -> Result<Json<MessageResponse>> {
    request.validate()?;

    if !state.users.exists(&request.mobile_phone).await? {
        return Err(AppError::NotFound(
            "User with this mobile phone number not found".to_string(),
        ));
    }

    // The user may have been deleted since the existence check.
    if !state
        .users
        .reset_password(&request.mobile_phone, &request.new_password)
        .await?
    {
        return Err(AppError::Internal(anyhow::anyhow!("Failed to reset password")));
    }

    Ok(MessageResponse::new("Password reset successfully"))
}

#[derive(Deserialize)]
struct CheckUserParams {
    mobile_phone: Option<String>,
}

#[derive(Serialize, Deserialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct CheckUserResponse {
    pub exists: bool,
}

/// Report whether a phone number is registered. The number may come from
/// the query string or from a JSON body.
async fn check_user(
    State(state): State<Arc<AppState>>,
    WithRejection(Query(params), _): WithRejection<Query<CheckUserParams>, AppError>,
    body: Bytes,
) -> Result<Json<CheckUserResponse>> {
    let mobile_phone = match params.mobile_phone {
        Some(phone) => phone,
        None if !body.is_empty() => serde_json::from_slice::<CheckUserParams>(&body)
            .map_err(|e| AppError::BadRequest(format!("Invalid JSON body: {e}")))?
            .mobile_phone
            .ok_or_else(|| AppError::BadRequest("mobile_phone is required".to_string()))?,
        None => return Err(AppError::BadRequest("mobile_phone is required".to_string())),
    };

    let exists = state.users.exists(&mobile_phone).await?;
    Ok(Json(CheckUserResponse { exists }))
}
