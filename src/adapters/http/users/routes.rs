//! Router for `/api/users`.

use axum::routing::get;
use axum::Router;

use super::handlers::list_users;
use crate::adapters::http::state::AppState;

/// # Routes
/// - `GET /` - Students (role `user`), newest first
pub fn user_routes() -> Router<AppState> {
    Router::new().route("/", get(list_users))
}
