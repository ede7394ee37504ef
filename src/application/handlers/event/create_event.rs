//! CreateEventHandler - Validates and schedules an event.

use std::sync::Arc;

use crate::domain::event::{Event, EventDraft, NewEvent};
use crate::domain::foundation::DomainError;
use crate::ports::EventRepository;

pub struct CreateEventHandler {
    events: Arc<dyn EventRepository>,
}

impl CreateEventHandler {
    pub fn new(events: Arc<dyn EventRepository>) -> Self {
        Self { events }
    }

    pub async fn handle(&self, draft: EventDraft) -> Result<Event, DomainError> {
        let new = NewEvent::from_draft(draft)?;
        let event = self.events.create(&new).await?;
        tracing::info!(event_id = %event.id, date = %event.event_date, "Event created");
        Ok(event)
    }
}
