//! RegisterParticipantHandler - Registers a member for an event.
//!
//! Checks run in a fixed order: ids present, not already registered, member
//! exists, event exists. The unique index still backs the duplicate check
//! when two requests race.

use std::sync::Arc;

use crate::domain::event::{Registration, RegistrationKey};
use crate::domain::foundation::DomainError;
use crate::ports::{EventRepository, MemberRepository};

#[derive(Debug, Clone, Default)]
pub struct RegisterParticipantCommand {
    pub event_id: Option<i64>,
    pub member_id: Option<i64>,
}

pub struct RegisterParticipantHandler {
    events: Arc<dyn EventRepository>,
    members: Arc<dyn MemberRepository>,
}

impl RegisterParticipantHandler {
    pub fn new(events: Arc<dyn EventRepository>, members: Arc<dyn MemberRepository>) -> Self {
        Self { events, members }
    }

    pub async fn handle(&self, cmd: RegisterParticipantCommand) -> Result<Registration, DomainError> {
        let key = RegistrationKey::parse(cmd.event_id, cmd.member_id)?;

        if self.events.find_registration(key).await?.is_some() {
            return Err(DomainError::conflict(
                "This member is already registered for this event",
            ));
        }
        if !self.members.exists(key.member_id).await? {
            return Err(DomainError::not_found("Member not found"));
        }
        if !self.events.exists(key.event_id).await? {
            return Err(DomainError::not_found("Event not found"));
        }

        let registration = self.events.register(key).await?;
        tracing::info!(
            event_id = %key.event_id,
            member_id = %key.member_id,
            "Member registered for event"
        );
        Ok(registration)
    }
}
