//! HTTP adapter for member endpoints.

pub mod dto;
mod handlers;
mod routes;

pub use routes::member_routes;
