//! In-memory events and registrations.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::Datelike;
use tokio::sync::RwLock;

use crate::domain::event::{Event, NewEvent, Registration, RegistrationKey};
use crate::domain::foundation::{DomainError, EventId, RegistrationId, Timestamp};
use crate::ports::EventRepository;

#[derive(Debug, Default)]
struct State {
    events: Vec<Event>,
    registrations: Vec<Registration>,
}

#[derive(Debug, Clone, Default)]
pub struct InMemoryEventRepository {
    state: Arc<RwLock<State>>,
}

impl InMemoryEventRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn registration_count(&self) -> usize {
        self.state.read().await.registrations.len()
    }
}

#[async_trait]
impl EventRepository for InMemoryEventRepository {
    async fn create(&self, new: &NewEvent) -> Result<Event, DomainError> {
        let mut state = self.state.write().await;
        let now = Timestamp::now();
        let event = Event {
            id: EventId::from_db(state.events.len() as i64 + 1),
            name: new.name.clone(),
            description: new.description.clone(),
            venue: new.venue.clone(),
            event_date: new.event_date,
            time_from: new.time_from,
            time_to: new.time_to,
            registration_start: new.registration_start,
            registration_end: new.registration_end,
            max_participants: new.max_participants,
            status: new.status,
            created_at: now,
            updated_at: now,
        };
        state.events.push(event.clone());
        Ok(event)
    }

    async fn exists(&self, id: EventId) -> Result<bool, DomainError> {
        Ok(self.state.read().await.events.iter().any(|e| e.id == id))
    }

    async fn list_in_month(&self, year: i32, month: u32) -> Result<Vec<Event>, DomainError> {
        let state = self.state.read().await;
        let mut events: Vec<Event> = state
            .events
            .iter()
            .filter(|e| e.event_date.year() == year && e.event_date.month() == month)
            .cloned()
            .collect();
        events.sort_by(|a, b| {
            (a.event_date, a.time_from, a.id).cmp(&(b.event_date, b.time_from, b.id))
        });
        Ok(events)
    }

    async fn find_registration(
        &self,
        key: RegistrationKey,
    ) -> Result<Option<Registration>, DomainError> {
        Ok(self
            .state
            .read()
            .await
            .registrations
            .iter()
            .find(|r| r.event_id == key.event_id && r.member_id == key.member_id)
            .cloned())
    }

    async fn register(&self, key: RegistrationKey) -> Result<Registration, DomainError> {
        let mut state = self.state.write().await;
        if state
            .registrations
            .iter()
            .any(|r| r.event_id == key.event_id && r.member_id == key.member_id)
        {
            return Err(DomainError::conflict(
                "This member is already registered for this event",
            ));
        }

        let registration = Registration {
            id: RegistrationId::from_db(state.registrations.len() as i64 + 1),
            event_id: key.event_id,
            member_id: key.member_id,
            registered_at: Timestamp::now(),
        };
        state.registrations.push(registration.clone());
        Ok(registration)
    }
}
