//! Events and their validation.

use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::domain::foundation::{
    non_blank, parse_date, parse_time, DomainError, EventId, Timestamp, ValidationError,
};

/// Lifecycle status of an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EventStatus {
    #[default]
    Upcoming,
    Ongoing,
    Completed,
    Cancelled,
}

impl EventStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            EventStatus::Upcoming => "upcoming",
            EventStatus::Ongoing => "ongoing",
            EventStatus::Completed => "completed",
            EventStatus::Cancelled => "cancelled",
        }
    }
}

impl fmt::Display for EventStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EventStatus {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "upcoming" => Ok(EventStatus::Upcoming),
            "ongoing" => Ok(EventStatus::Ongoing),
            "completed" => Ok(EventStatus::Completed),
            "cancelled" => Ok(EventStatus::Cancelled),
            _ => Err(ValidationError::invalid_format(
                "status",
                "must be one of: upcoming, ongoing, completed, cancelled",
            )),
        }
    }
}

/// A persisted event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Event {
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

/// Raw event input as received from a client.
#[derive(Debug, Clone, Default)]
pub struct EventDraft {
    pub name: Option<String>,
    pub description: Option<String>,
    pub venue: Option<String>,
    pub event_date: Option<String>,
    pub time_from: Option<String>,
    pub time_to: Option<String>,
    pub registration_start: Option<String>,
    pub registration_end: Option<String>,
    pub max_participants: Option<i64>,
    pub status: Option<String>,
}

/// A validated event ready for insertion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewEvent {
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
}

impl NewEvent {
    pub fn from_draft(draft: EventDraft) -> Result<Self, DomainError> {
        let name = non_blank(draft.name);
        let event_date = non_blank(draft.event_date);
        let time_from = non_blank(draft.time_from);
        let time_to = non_blank(draft.time_to);

        let (Some(name), Some(event_date), Some(time_from), Some(time_to)) =
            (name.clone(), event_date.clone(), time_from.clone(), time_to.clone())
        else {
            let missing = [
                (name.is_none(), "Name is required"),
                (event_date.is_none(), "Event date is required"),
                (time_from.is_none(), "Start time is required"),
                (time_to.is_none(), "End time is required"),
            ]
            .into_iter()
            .filter(|(absent, _)| *absent)
            .map(|(_, msg)| msg.to_string())
            .collect();
            return Err(DomainError::missing_fields(missing));
        };

        let mut errors = Vec::new();

        let event_date = parse_date(&event_date);
        if event_date.is_none() {
            errors.push("Event date must be a valid YYYY-MM-DD date".to_string());
        }
        let time_from = parse_time(&time_from);
        if time_from.is_none() {
            errors.push("Start time must be in HH:MM or HH:MM:SS format".to_string());
        }
        let time_to = parse_time(&time_to);
        if time_to.is_none() {
            errors.push("End time must be in HH:MM or HH:MM:SS format".to_string());
        }

        let mut optional_date = |raw: Option<String>, label: &str| match non_blank(raw) {
            None => None,
            Some(value) => {
                let parsed = parse_date(&value);
                if parsed.is_none() {
                    errors.push(format!("{} must be a valid YYYY-MM-DD date", label));
                }
                parsed
            }
        };
        let registration_start = optional_date(draft.registration_start, "Registration start");
        let registration_end = optional_date(draft.registration_end, "Registration end");

        let max_participants = match draft.max_participants {
            None => None,
            Some(n) if n > 0 && n <= i32::MAX as i64 => Some(n as i32),
            Some(_) => {
                errors.push("Max participants must be a positive number".to_string());
                None
            }
        };

        let status = match non_blank(draft.status) {
            None => EventStatus::default(),
            Some(s) => s.parse::<EventStatus>().unwrap_or_else(|_| {
                errors.push(
                    "Status must be one of: upcoming, ongoing, completed, cancelled".to_string(),
                );
                EventStatus::default()
            }),
        };

        match (event_date, time_from, time_to) {
            (Some(event_date), Some(time_from), Some(time_to)) if errors.is_empty() => Ok(Self {
                name,
                description: draft.description.unwrap_or_default(),
                venue: draft.venue.unwrap_or_default(),
                event_date,
                time_from,
                time_to,
                registration_start,
                registration_end,
                max_participants,
                status,
            }),
            _ => Err(DomainError::validation("Validation failed", errors)),
        }
    }
}
