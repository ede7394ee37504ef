//! HTTP adapter for event endpoints.

pub mod dto;
mod handlers;
mod routes;

pub use routes::event_routes;
