//! HTTP handlers for event endpoints.

use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;

use crate::adapters::http::error::ApiError;
use crate::adapters::http::extract::ApiJson;
use crate::adapters::http::state::AppState;
use crate::application::handlers::{CheckRegistrationQuery, RegisterParticipantCommand};

use super::dto::{
    CreateEventRequest, EventResponse, EventView, MonthEventsResponse,
    RegisterParticipantRequest, RegistrationCheckResponse, RegistrationQuery,
    RegistrationResponse,
};

/// POST /api/events
pub async fn create_event(
    State(state): State<AppState>,
    ApiJson(req): ApiJson<CreateEventRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let event = state.create_event_handler().handle(req.into()).await?;

    Ok((
        StatusCode::CREATED,
        Json(EventResponse {
            success: true,
            message: "Event created successfully".to_string(),
            event: event.into(),
        }),
    ))
}

/// GET /api/events/this-month
pub async fn this_month(State(state): State<AppState>) -> Result<impl IntoResponse, ApiError> {
    let month = state.this_month_handler().handle().await?;
    let events: Vec<EventView> = month.events.into_iter().map(EventView::from).collect();

    Ok(Json(MonthEventsResponse {
        success: true,
        message: "This month's events fetched successfully".to_string(),
        count: events.len(),
        events,
        month: month.month,
        year: month.year,
    }))
}

/// POST /api/events/registrations
pub async fn register_participant(
    State(state): State<AppState>,
    ApiJson(req): ApiJson<RegisterParticipantRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let registration = state
        .register_participant_handler()
        .handle(RegisterParticipantCommand {
            event_id: req.event_id,
            member_id: req.member_id,
        })
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(RegistrationResponse {
            success: true,
            message: "Participant registered successfully".to_string(),
            registration: registration.into(),
        }),
    ))
}

/// GET /api/events/registrations/check?event_id&member_id
pub async fn check_registration(
    State(state): State<AppState>,
    Query(query): Query<RegistrationQuery>,
) -> Result<impl IntoResponse, ApiError> {
    let (event_id, member_id) = query.ids();
    let (key, is_registered) = state
        .check_registration_handler()
        .handle(CheckRegistrationQuery {
            event_id,
            member_id,
        })
        .await?;

    Ok(Json(RegistrationCheckResponse {
        success: true,
        is_registered,
        event_id: key.event_id,
        member_id: key.member_id,
    }))
}
