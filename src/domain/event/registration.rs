//! Event registrations link a member to an event at most once.

use crate::domain::foundation::{DomainError, EventId, MemberId, RegistrationId, Timestamp};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Registration {
    pub id: RegistrationId,
    pub event_id: EventId,
    pub member_id: MemberId,
    pub registered_at: Timestamp,
}

/// The (event, member) pair named by a registration request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RegistrationKey {
    pub event_id: EventId,
    pub member_id: MemberId,
}

impl RegistrationKey {
    /// Both ids must be present and positive.
    pub fn parse(event_id: Option<i64>, member_id: Option<i64>) -> Result<Self, DomainError> {
        let event_id = event_id.and_then(|id| EventId::new(id).ok());
        let member_id = member_id.and_then(|id| MemberId::new(id).ok());

        match (event_id, member_id) {
            (Some(event_id), Some(member_id)) => Ok(Self {
                event_id,
                member_id,
            }),
            _ => Err(DomainError::validation(
                "event_id and member_id parameters are required",
                Vec::new(),
            )),
        }
    }
}
