//! HTTP adapters - REST API under `/api`.
//!
//! Each resource has its own module with DTOs, handlers and routes. Shared
//! pieces live alongside:
//!
//! - `state` - `AppState` holding every port
//! - `error` - `DomainError` to status code and JSON body
//! - `extract` - JSON body extraction and lenient field parsing
//! - `middleware` - Bearer token verification and the `RequireAuth` extractor
//! - `router` - Assembles the resources with CORS, tracing and timeouts

pub mod auth;
pub mod error;
pub mod events;
pub mod extract;
pub mod members;
pub mod middleware;
pub mod profiles;
pub mod requirements;
pub mod router;
pub mod state;
pub mod users;

pub use error::{ApiError, ErrorResponse};
pub use router::{api_routes, app_router};
pub use state::AppState;
