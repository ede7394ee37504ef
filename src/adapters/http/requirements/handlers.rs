//! HTTP handlers for requirement endpoints.
//!
//! Mutations require a verified caller whose local account is an admin.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;

use crate::adapters::http::error::ApiError;
use crate::adapters::http::extract::ApiJson;
use crate::adapters::http::middleware::RequireAuth;
use crate::adapters::http::state::AppState;
use crate::application::handlers::{
    ListRequirementsQuery, RecordComplianceCommand, UpdateRequirementCommand,
};
use crate::domain::foundation::{AuthenticatedUser, PageRequest, RequirementId};
use crate::domain::requirement::RequirementStatus;

use super::dto::{
    ArchiveResponse, ComplianceRequest, ComplianceResponse, ListRequirementsParams,
    RequirementListResponse, RequirementRequest, RequirementResponse, RequirementWithStatsView,
};

fn parse_id(raw: &str) -> Result<RequirementId, ApiError> {
    raw.parse()
        .map_err(|_| ApiError::bad_request("Requirement ID must be a positive integer"))
}

async fn require_admin(state: &AppState, caller: &AuthenticatedUser) -> Result<(), ApiError> {
    state.require_admin_handler().handle(caller).await?;
    Ok(())
}

/// GET /api/requirements?page&limit&status
pub async fn list_requirements(
    State(state): State<AppState>,
    Query(params): Query<ListRequirementsParams>,
) -> Result<impl IntoResponse, ApiError> {
    let page = state
        .list_requirements_handler()
        .handle(ListRequirementsQuery {
            page: PageRequest::from_query(params.page.as_deref(), params.limit.as_deref()),
            status: RequirementStatus::filter_from_query(params.status.as_deref()),
        })
        .await?;

    Ok(Json(RequirementListResponse {
        success: true,
        requirements: page
            .items
            .into_iter()
            .map(RequirementWithStatsView::from)
            .collect(),
        pagination: page.info,
    }))
}

/// POST /api/requirements
pub async fn create_requirement(
    State(state): State<AppState>,
    RequireAuth(caller): RequireAuth,
    ApiJson(req): ApiJson<RequirementRequest>,
) -> Result<impl IntoResponse, ApiError> {
    require_admin(&state, &caller).await?;
    let requirement = state.create_requirement_handler().handle(req.into()).await?;

    Ok((
        StatusCode::CREATED,
        Json(RequirementResponse {
            success: true,
            message: "Requirement created successfully".to_string(),
            requirement: requirement.into(),
        }),
    ))
}

/// PUT /api/requirements/:id
pub async fn update_requirement(
    State(state): State<AppState>,
    RequireAuth(caller): RequireAuth,
    Path(id): Path<String>,
    ApiJson(req): ApiJson<RequirementRequest>,
) -> Result<impl IntoResponse, ApiError> {
    require_admin(&state, &caller).await?;
    let id = parse_id(&id)?;
    let requirement = state
        .update_requirement_handler()
        .handle(UpdateRequirementCommand {
            id,
            draft: req.into(),
        })
        .await?;

    Ok(Json(RequirementResponse {
        success: true,
        message: "Requirement updated successfully".to_string(),
        requirement: requirement.into(),
    }))
}

/// DELETE /api/requirements/:id
pub async fn archive_requirement(
    State(state): State<AppState>,
    RequireAuth(caller): RequireAuth,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    require_admin(&state, &caller).await?;
    let id = state
        .archive_requirement_handler()
        .handle(parse_id(&id)?)
        .await?;

    Ok(Json(ArchiveResponse {
        success: true,
        message: "Requirement deleted successfully".to_string(),
        id,
    }))
}

/// PUT /api/requirements/:id/compliance
pub async fn record_compliance(
    State(state): State<AppState>,
    RequireAuth(caller): RequireAuth,
    Path(id): Path<String>,
    ApiJson(req): ApiJson<ComplianceRequest>,
) -> Result<impl IntoResponse, ApiError> {
    require_admin(&state, &caller).await?;
    let record = state
        .record_compliance_handler()
        .handle(RecordComplianceCommand {
            requirement_id: parse_id(&id)?,
            member_id: req.member_id,
            status: req.status,
        })
        .await?;

    Ok(Json(ComplianceResponse {
        success: true,
        message: "Compliance recorded successfully".to_string(),
        compliance: record.into(),
    }))
}
