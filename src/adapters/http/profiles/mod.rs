//! HTTP adapter for profile endpoints.

pub mod dto;
mod handlers;
mod routes;

pub use routes::profile_routes;
