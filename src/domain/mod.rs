//! Domain layer containing business rules and domain types.
//!
//! # Module Organization
//!
//! - `foundation` - Shared primitives (ids, errors, pagination, auth types)
//! - `user` - Local user accounts, profiles and passwords
//! - `member` - Member records keyed by school ID number
//! - `event` - Events and member registrations
//! - `requirement` - Requirements and compliance tallies

pub mod event;
pub mod foundation;
pub mod member;
pub mod requirement;
pub mod user;
