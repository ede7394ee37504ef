//! Router for `/api/auth`.

use axum::routing::{get, post};
use axum::Router;

use super::handlers::{logout, register, user_by_id_number, verify_token};
use crate::adapters::http::state::AppState;

/// # Routes
/// - `POST /verify-token` - Resolve an ID token to the local user
/// - `POST /register` - Create the local user (and remote identity for credential sign-ups)
/// - `POST /logout` - Acknowledge a sign-out
/// - `GET /user-by-id-number` - Look up a user by school ID number
pub fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/verify-token", post(verify_token))
        .route("/register", post(register))
        .route("/logout", post(logout))
        .route("/user-by-id-number", get(user_by_id_number))
}
