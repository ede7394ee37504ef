//! HTTP handlers for member endpoints.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;

use crate::adapters::http::error::ApiError;
use crate::adapters::http::extract::{ApiJson, PageQuery};
use crate::adapters::http::state::AppState;
use crate::application::handlers::{CheckMemberQuery, GetMemberQuery};

use super::dto::{
    CreateMemberRequest, IdNumberQuery, MemberCheckResponse, MemberListResponse, MemberResponse,
    MemberSummaryResponse, MemberSummaryView, MemberView,
};

/// POST /api/members
pub async fn create_member(
    State(state): State<AppState>,
    ApiJson(req): ApiJson<CreateMemberRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let member = state.create_member_handler().handle(req.into()).await?;

    Ok((
        StatusCode::CREATED,
        Json(MemberResponse {
            success: true,
            message: "Member created successfully".to_string(),
            member: member.into(),
        }),
    ))
}

/// GET /api/members?page&limit
pub async fn list_members(
    State(state): State<AppState>,
    Query(query): Query<PageQuery>,
) -> Result<impl IntoResponse, ApiError> {
    let page = state
        .list_members_handler()
        .handle(query.to_request())
        .await?;

    Ok(Json(MemberListResponse {
        success: true,
        members: page.items.into_iter().map(MemberView::from).collect(),
        pagination: page.info,
    }))
}

/// GET /api/members/:id
///
/// `id` is either the numeric member id or a school ID number.
pub async fn get_member(
    State(state): State<AppState>,
    Path(key): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let member = state
        .get_member_handler()
        .handle(GetMemberQuery { key })
        .await?;

    Ok(Json(MemberResponse {
        success: true,
        message: "Member retrieved successfully".to_string(),
        member: member.into(),
    }))
}

/// GET /api/members/check?idNumber=
pub async fn check_member(
    State(state): State<AppState>,
    Query(query): Query<IdNumberQuery>,
) -> Result<impl IntoResponse, ApiError> {
    let member = state
        .check_member_handler()
        .handle(CheckMemberQuery {
            id_school_number: query.id_number,
        })
        .await?;

    Ok(Json(MemberCheckResponse {
        success: true,
        exists: member.is_some(),
        member: member.map(MemberView::from),
    }))
}

/// GET /api/members/summary
pub async fn member_summary(State(state): State<AppState>) -> Result<impl IntoResponse, ApiError> {
    let members: Vec<MemberSummaryView> = state
        .member_summaries_handler()
        .handle()
        .await?
        .into_iter()
        .map(Into::into)
        .collect();

    Ok(Json(MemberSummaryResponse {
        success: true,
        count: members.len(),
        members,
    }))
}
