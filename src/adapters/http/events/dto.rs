//! Request and response bodies for `/api/events`.

use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};

use crate::adapters::http::extract::lenient;
use crate::domain::event::{Event, EventDraft, EventStatus, Registration};
use crate::domain::foundation::{EventId, MemberId, RegistrationId, Timestamp};

// ════════════════════════════════════════════════════════════════════════════════
// Request DTOs
// ════════════════════════════════════════════════════════════════════════════════

#[derive(Debug, Clone, Default, Deserialize)]
pub struct CreateEventRequest {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub venue: Option<String>,
    #[serde(default)]
    pub event_date: Option<String>,
    #[serde(default)]
    pub time_from: Option<String>,
    #[serde(default)]
    pub time_to: Option<String>,
    #[serde(default)]
    pub registration_start: Option<String>,
    #[serde(default)]
    pub registration_end: Option<String>,
    #[serde(default, deserialize_with = "lenient::opt_i64")]
    pub max_participants: Option<i64>,
    #[serde(default)]
    pub status: Option<String>,
}

impl From<CreateEventRequest> for EventDraft {
    fn from(req: CreateEventRequest) -> Self {
        EventDraft {
            name: req.name,
            description: req.description,
            venue: req.venue,
            event_date: req.event_date,
            time_from: req.time_from,
            time_to: req.time_to,
            registration_start: req.registration_start,
            registration_end: req.registration_end,
            max_participants: req.max_participants,
            status: req.status,
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RegisterParticipantRequest {
    #[serde(default, deserialize_with = "lenient::opt_i64")]
    pub event_id: Option<i64>,
    #[serde(default, deserialize_with = "lenient::opt_i64")]
    pub member_id: Option<i64>,
}

/// Query values stay raw; anything unparsable counts as missing.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RegistrationQuery {
    pub event_id: Option<String>,
    pub member_id: Option<String>,
}

impl RegistrationQuery {
    pub fn ids(&self) -> (Option<i64>, Option<i64>) {
        let parse = |v: &Option<String>| v.as_deref().and_then(|s| s.trim().parse().ok());
        (parse(&self.event_id), parse(&self.member_id))
    }
}

// ════════════════════════════════════════════════════════════════════════════════
// Response DTOs
// ════════════════════════════════════════════════════════════════════════════════

#[derive(Debug, Clone, Serialize)]
pub struct EventView {
    pub id: EventId,
    pub name: String,
    pub description: String,
    pub venue: String,
    pub event_date: NaiveDate,
    pub time_from: NaiveTime,
    pub time_to: NaiveTime,
    pub registration_start: Option<NaiveDate>,
    pub registration_end: Option<NaiveDate>,
    pub max_participants: Option<i32>,
    pub status: EventStatus,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl From<Event> for EventView {
    fn from(e: Event) -> Self {
        Self {
            id: e.id,
            name: e.name,
            description: e.description,
            venue: e.venue,
            event_date: e.event_date,
            time_from: e.time_from,
            time_to: e.time_to,
            registration_start: e.registration_start,
            registration_end: e.registration_end,
            max_participants: e.max_participants,
            status: e.status,
            created_at: e.created_at,
            updated_at: e.updated_at,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct EventResponse {
    pub success: bool,
    pub message: String,
    pub event: EventView,
}

#[derive(Debug, Clone, Serialize)]
pub struct MonthEventsResponse {
    pub success: bool,
    pub message: String,
    pub events: Vec<EventView>,
    pub month: u32,
    pub year: i32,
    pub count: usize,
}

#[derive(Debug, Clone, Serialize)]
pub struct RegistrationView {
    pub id: RegistrationId,
    pub event_id: EventId,
    pub member_id: MemberId,
    pub registered_at: String,
}

impl From<Registration> for RegistrationView {
    fn from(r: Registration) -> Self {
        Self {
            id: r.id,
            event_id: r.event_id,
            member_id: r.member_id,
            registered_at: r.registered_at.to_display_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct RegistrationResponse {
    pub success: bool,
    pub message: String,
    pub registration: RegistrationView,
}

#[derive(Debug, Clone, Serialize)]
pub struct RegistrationCheckResponse {
    pub success: bool,
    pub is_registered: bool,
    pub event_id: EventId,
    pub member_id: MemberId,
}
