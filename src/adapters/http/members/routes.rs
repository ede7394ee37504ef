//! Router for `/api/members`.

use axum::routing::get;
use axum::Router;

use super::handlers::{check_member, create_member, get_member, list_members, member_summary};
use crate::adapters::http::state::AppState;

/// # Routes
/// - `POST /` - Create a member
/// - `GET /` - Paginated member list
/// - `GET /check` - Existence check by school ID number
/// - `GET /summary` - Compact list of every member
/// - `GET /:id` - One member by id or school ID number
pub fn member_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_members).post(create_member))
        .route("/check", get(check_member))
        .route("/summary", get(member_summary))
        .route("/:id", get(get_member))
}
