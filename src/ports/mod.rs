//! Ports - Interfaces for external dependencies.
//!
//! Following hexagonal architecture, ports define the contracts between
//! the domain and the outside world. Adapters implement these ports.
//!
//! ## Identity Ports
//!
//! - `TokenVerifier` - Verifies ID tokens presented by clients
//! - `IdentityProvider` - Administrative access to remote accounts
//!
//! ## Repository Ports
//!
//! - `UserRepository`, `ProfileRepository` - Local accounts and profiles
//! - `MemberRepository` - Member records
//! - `EventRepository` - Events and registrations
//! - `RequirementRepository` - Requirements and compliance records

mod event_repository;
mod identity_provider;
mod member_repository;
mod profile_repository;
mod requirement_repository;
mod token_verifier;
mod user_repository;

pub use event_repository::EventRepository;
pub use identity_provider::IdentityProvider;
pub use member_repository::MemberRepository;
pub use profile_repository::ProfileRepository;
pub use requirement_repository::RequirementRepository;
pub use token_verifier::TokenVerifier;
pub use user_repository::UserRepository;
