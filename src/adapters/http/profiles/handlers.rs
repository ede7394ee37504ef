//! HTTP handlers for profile endpoints.

use axum::extract::{Path, State};
use axum::response::IntoResponse;
use axum::Json;

use crate::adapters::http::error::ApiError;
use crate::adapters::http::extract::ApiJson;
use crate::adapters::http::state::AppState;
use crate::application::handlers::{
    ChangePasswordCommand, UpdateAccountCommand, UpdateProfileCommand,
};
use crate::domain::foundation::UserId;

use super::dto::{
    ChangePasswordRequest, MessageResponse, ProfileResponse, UpdateAccountRequest,
    UpdateProfileRequest,
};

fn parse_user_id(raw: &str) -> Result<UserId, ApiError> {
    raw.parse()
        .map_err(|_| ApiError::bad_request("User ID must be a positive integer"))
}

/// GET /api/profiles/:user_id
pub async fn get_profile(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let profile = state
        .get_profile_handler()
        .handle(parse_user_id(&user_id)?)
        .await?;

    Ok(Json(ProfileResponse {
        success: true,
        message: "User profile retrieved successfully".to_string(),
        user_profile: profile.into(),
    }))
}

/// PUT /api/profiles/:user_id
pub async fn update_profile(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
    ApiJson(req): ApiJson<UpdateProfileRequest>,
) -> Result<impl IntoResponse, ApiError> {
    state
        .update_profile_handler()
        .handle(
            parse_user_id(&user_id)?,
            UpdateProfileCommand {
                display_name: req.display_name,
                bio: req.bio,
            },
        )
        .await?;

    Ok(Json(MessageResponse::ok(
        "User profile information updated successfully",
    )))
}

/// PUT /api/profiles/:user_id/account
pub async fn update_account(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
    ApiJson(req): ApiJson<UpdateAccountRequest>,
) -> Result<impl IntoResponse, ApiError> {
    state
        .update_account_handler()
        .handle(
            parse_user_id(&user_id)?,
            UpdateAccountCommand {
                email: req.email,
                phone_number: req.phone_number,
                gender: req.gender,
            },
        )
        .await?;

    Ok(Json(MessageResponse::ok("User account updated successfully")))
}

/// PUT /api/profiles/:user_id/password
pub async fn change_password(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
    ApiJson(req): ApiJson<ChangePasswordRequest>,
) -> Result<impl IntoResponse, ApiError> {
    state
        .change_password_handler()
        .handle(
            parse_user_id(&user_id)?,
            ChangePasswordCommand {
                current_password: req.current_password,
                new_password: req.new_password,
            },
        )
        .await?;

    Ok(Json(MessageResponse::ok("User password updated successfully")))
}
