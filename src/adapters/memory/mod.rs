//! In-memory repository adapters.
//!
//! Mirror the PostgreSQL adapters' constraints (unique keys, ordering,
//! pagination) without a database. Used by tests and local development.

mod events;
mod members;
mod requirements;
mod users;

pub use events::InMemoryEventRepository;
pub use members::InMemoryMemberRepository;
pub use requirements::InMemoryRequirementRepository;
pub use users::InMemoryUserStore;
