//! HTTP adapter for identity endpoints.
//!
//! - `POST /api/auth/verify-token`
//! - `POST /api/auth/register`
//! - `POST /api/auth/logout`
//! - `GET /api/auth/user-by-id-number`

pub mod dto;
mod handlers;
mod routes;

pub use routes::auth_routes;
