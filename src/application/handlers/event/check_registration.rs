//! CheckRegistrationHandler - Whether a member is registered for an event.

use std::sync::Arc;

use crate::domain::event::RegistrationKey;
use crate::domain::foundation::DomainError;
use crate::ports::EventRepository;

#[derive(Debug, Clone, Default)]
pub struct CheckRegistrationQuery {
    pub event_id: Option<i64>,
    pub member_id: Option<i64>,
}

pub struct CheckRegistrationHandler {
    events: Arc<dyn EventRepository>,
}

impl CheckRegistrationHandler {
    pub fn new(events: Arc<dyn EventRepository>) -> Self {
        Self { events }
    }

    pub async fn handle(
        &self,
        query: CheckRegistrationQuery,
    ) -> Result<(RegistrationKey, bool), DomainError> {
        let key = RegistrationKey::parse(query.event_id, query.member_id)?;
        let registered = self.events.find_registration(key).await?.is_some();
        Ok((key, registered))
    }
}
