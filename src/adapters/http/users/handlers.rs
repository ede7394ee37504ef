//! HTTP handlers for the user directory.

use axum::extract::{Query, State};
use axum::response::IntoResponse;
use axum::Json;

use crate::adapters::http::error::ApiError;
use crate::adapters::http::extract::PageQuery;
use crate::adapters::http::state::AppState;

use super::dto::{UserListResponse, UserView};

/// GET /api/users?page&limit
pub async fn list_users(
    State(state): State<AppState>,
    Query(query): Query<PageQuery>,
) -> Result<impl IntoResponse, ApiError> {
    let page = state.list_users_handler().handle(query.to_request()).await?;

    Ok(Json(UserListResponse {
        success: true,
        message: "Users fetched successfully".to_string(),
        total_count: page.info.total,
        users: page.items.into_iter().map(UserView::from).collect(),
        pagination: page.info,
    }))
}
