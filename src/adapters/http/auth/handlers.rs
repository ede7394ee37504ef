//! HTTP handlers for the identity endpoints.

use axum::extract::{Query, State};
use axum::http::{HeaderMap, StatusCode};
use axum::response::IntoResponse;
use axum::Json;

use crate::adapters::http::error::ApiError;
use crate::adapters::http::extract::ApiJson;
use crate::adapters::http::middleware::bearer_token;
use crate::adapters::http::state::AppState;
use crate::application::handlers::{
    GetUserByIdNumberQuery, LogoutCommand, RegisterCommand, VerifyTokenCommand,
};
use crate::domain::foundation::UserId;

use super::dto::{
    AuthUserView, IdNumberQuery, LogoutRequest, LogoutResponse, RegisterRequest,
    RegisterResponse, UserByIdNumberResponse, VerifyTokenRequest, VerifyTokenResponse,
};

/// POST /api/auth/verify-token
///
/// The token may come in the body or as a Bearer header.
pub async fn verify_token(
    State(state): State<AppState>,
    headers: HeaderMap,
    ApiJson(req): ApiJson<VerifyTokenRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let id_token = req
        .id_token
        .or_else(|| bearer_token(&headers).map(str::to_string));

    let result = state
        .verify_token_handler()
        .handle(VerifyTokenCommand { id_token })
        .await?;

    Ok(Json(VerifyTokenResponse {
        success: true,
        message: "Token verified successfully".to_string(),
        user: AuthUserView::new(result.user, result.identity.email_verified),
        firebase_claims: result.claims,
    }))
}

/// POST /api/auth/register
pub async fn register(
    State(state): State<AppState>,
    ApiJson(req): ApiJson<RegisterRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let result = state
        .register_handler()
        .handle(RegisterCommand {
            id_token: req.id_token,
            email: req.email,
            password: req.password,
            first_name: req.first_name,
            name: req.name,
            last_name: req.last_name,
            id_school_number: req.id_school_number,
        })
        .await?;

    let email_verified = result.user.email_verified_at.is_some();
    Ok((
        StatusCode::CREATED,
        Json(RegisterResponse {
            success: true,
            message: "User registered successfully".to_string(),
            user: AuthUserView::new(result.user, email_verified),
            custom_token: result.custom_token,
        }),
    ))
}

/// POST /api/auth/logout
///
/// Accepts an empty body.
pub async fn logout(
    State(state): State<AppState>,
    body: Option<ApiJson<LogoutRequest>>,
) -> Result<impl IntoResponse, ApiError> {
    let user_id = body
        .and_then(|ApiJson(req)| req.user_id)
        .and_then(|id| UserId::new(id).ok());

    let at = state
        .logout_handler()
        .handle(LogoutCommand { user_id })
        .await?;

    Ok(Json(LogoutResponse {
        success: true,
        message: "User logged out successfully".to_string(),
        timestamp: at.to_display_string(),
    }))
}

/// GET /api/auth/user-by-id-number?idNumber=
pub async fn user_by_id_number(
    State(state): State<AppState>,
    Query(query): Query<IdNumberQuery>,
) -> Result<impl IntoResponse, ApiError> {
    let user = state
        .user_by_id_number_handler()
        .handle(GetUserByIdNumberQuery {
            id_school_number: query.id_number,
        })
        .await?;

    Ok(Json(UserByIdNumberResponse {
        success: true,
        data: user.into(),
    }))
}
