//! ListThisMonthHandler - Events dated in the current UTC month.

use std::sync::Arc;

use crate::domain::event::Event;
use crate::domain::foundation::{DomainError, Timestamp};
use crate::ports::EventRepository;

#[derive(Debug, Clone)]
pub struct MonthEvents {
    pub events: Vec<Event>,
    pub month: u32,
    pub year: i32,
}

pub struct ListThisMonthHandler {
    events: Arc<dyn EventRepository>,
}

impl ListThisMonthHandler {
    pub fn new(events: Arc<dyn EventRepository>) -> Self {
        Self { events }
    }

    pub async fn handle(&self) -> Result<MonthEvents, DomainError> {
        self.handle_at(Timestamp::now()).await
    }

    pub async fn handle_at(&self, now: Timestamp) -> Result<MonthEvents, DomainError> {
        let (year, month) = now.year_month();
        let events = self.events.list_in_month(year, month).await?;
        Ok(MonthEvents {
            events,
            month,
            year,
        })
    }
}
