//! Adapters - Implementations of port interfaces.
//!
//! Adapters connect the domain to external systems:
//! - `auth` - Firebase identity (token verification, account administration)
//! - `http` - axum REST API
//! - `memory` - In-memory repositories for tests and local runs
//! - `postgres` - sqlx repositories

pub mod auth;
pub mod http;
pub mod memory;
pub mod postgres;
