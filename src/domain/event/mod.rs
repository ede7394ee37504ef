//! Event registry domain: events and member registrations.

mod registration;
mod schedule;

pub use registration::{Registration, RegistrationKey};
pub use schedule::{Event, EventDraft, EventStatus, NewEvent};
