//! HTTP adapter for requirement endpoints.

pub mod dto;
mod handlers;
mod routes;

pub use routes::requirement_routes;
