//! Event registry handlers.

mod check_registration;
mod create_event;
mod list_this_month;
mod register_participant;

pub use check_registration::{CheckRegistrationHandler, CheckRegistrationQuery};
pub use create_event::CreateEventHandler;
pub use list_this_month::{ListThisMonthHandler, MonthEvents};
pub use register_participant::{RegisterParticipantCommand, RegisterParticipantHandler};
