//! HTTP adapter for the user directory.

pub mod dto;
mod handlers;
mod routes;

pub use routes::user_routes;
