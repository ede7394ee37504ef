//! EventRepository port for events and registrations.

use async_trait::async_trait;

use crate::domain::event::{Event, NewEvent, Registration, RegistrationKey};
use crate::domain::foundation::{DomainError, EventId};

#[async_trait]
pub trait EventRepository: Send + Sync {
    async fn create(&self, event: &NewEvent) -> Result<Event, DomainError>;

    async fn exists(&self, id: EventId) -> Result<bool, DomainError>;

    /// Events dated within the given calendar month, earliest first.
    async fn list_in_month(&self, year: i32, month: u32) -> Result<Vec<Event>, DomainError>;

    async fn find_registration(
        &self,
        key: RegistrationKey,
    ) -> Result<Option<Registration>, DomainError>;

    /// Insert a registration. Returns `Conflict` if the pair already exists.
    async fn register(&self, key: RegistrationKey) -> Result<Registration, DomainError>;
}
