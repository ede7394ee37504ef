//! Top-level router: every resource under `/api`, plus `/health`.

use axum::extract::Request;
use axum::http::header::{ACCEPT, AUTHORIZATION, CONTENT_TYPE, ORIGIN};
use axum::http::{HeaderName, HeaderValue, Method};
use axum::routing::get;
use axum::{middleware, Json, Router};
use serde_json::{json, Value};
use tower_http::cors::{Any, CorsLayer};
use tower_http::request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

use super::auth::auth_routes;
use super::events::event_routes;
use super::members::member_routes;
use super::middleware::{auth_middleware, AuthState};
use super::profiles::profile_routes;
use super::requirements::requirement_routes;
use super::state::AppState;
use super::users::user_routes;
use crate::config::ServerConfig;

const REQUEST_ID: HeaderName = HeaderName::from_static("x-request-id");
const X_REQUEST_WITH: HeaderName = HeaderName::from_static("x-request-with");
const X_REQUESTED_WITH: HeaderName = HeaderName::from_static("x-requested-with");

/// Routes under `/api`, behind the Bearer token middleware.
pub fn api_routes(state: AppState) -> Router {
    let verifier: AuthState = state.token_verifier.clone();

    Router::new()
        .nest("/auth", auth_routes())
        .nest("/members", member_routes())
        .nest("/events", event_routes())
        .nest("/requirements", requirement_routes())
        .nest("/profiles", profile_routes())
        .nest("/users", user_routes())
        .with_state(state)
        .layer(middleware::from_fn_with_state(verifier, auth_middleware))
}

/// The full application with CORS, tracing, timeouts and request ids.
pub fn app_router(state: AppState, server: &ServerConfig) -> Router {
    Router::new()
        .route("/health", get(health))
        .nest("/api", api_routes(state))
        .layer(TimeoutLayer::new(server.request_timeout()))
        .layer(cors_layer(&server.cors_origins_list()))
        .layer(PropagateRequestIdLayer::new(REQUEST_ID))
        .layer(TraceLayer::new_for_http().make_span_with(|req: &Request| {
            let request_id = req
                .headers()
                .get(&REQUEST_ID)
                .and_then(|v| v.to_str().ok())
                .unwrap_or("-");
            tracing::info_span!(
                "http",
                method = %req.method(),
                uri = %req.uri(),
                request_id = %request_id,
            )
        }))
        .layer(SetRequestIdLayer::new(REQUEST_ID, MakeRequestUuid))
}

/// Allows the listed origins, or any origin when the list is empty.
pub fn cors_layer(origins: &[String]) -> CorsLayer {
    let base = CorsLayer::new()
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([
            ORIGIN,
            CONTENT_TYPE,
            ACCEPT,
            AUTHORIZATION,
            X_REQUEST_WITH,
            X_REQUESTED_WITH,
        ]);

    let allowed: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|o| match o.parse() {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!(origin = %o, "Ignoring unparsable CORS origin");
                None
            }
        })
        .collect();

    if allowed.is_empty() {
        base.allow_origin(Any)
    } else {
        base.allow_origin(allowed)
    }
}

async fn health() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}
