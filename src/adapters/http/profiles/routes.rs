//! Router for `/api/profiles`.

use axum::routing::{get, put};
use axum::Router;

use super::handlers::{change_password, get_profile, update_account, update_profile};
use crate::adapters::http::state::AppState;

/// # Routes
/// - `GET /:user_id` - Profile with the user's email and school ID
/// - `PUT /:user_id` - Display name and bio
/// - `PUT /:user_id/account` - Email, phone number and gender together
/// - `PUT /:user_id/password` - Change the local password
pub fn profile_routes() -> Router<AppState> {
    Router::new()
        .route("/:user_id", get(get_profile).put(update_profile))
        .route("/:user_id/account", put(update_account))
        .route("/:user_id/password", put(change_password))
}
