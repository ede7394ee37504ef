//! Application layer - Commands, Queries, and Handlers.
//!
//! This layer orchestrates domain operations and coordinates between ports.
//! Handlers take their ports as `Arc<dyn Port>` and never touch adapters.

pub mod handlers;

pub use handlers::{
    // Identity
    RegisterCommand, RegisterHandler, VerifyTokenCommand, VerifyTokenHandler,
    // Registries
    CreateEventHandler, CreateMemberHandler, CreateRequirementHandler, ListRequirementsHandler,
};
