//! Router for `/api/events`.

use axum::routing::{get, post};
use axum::Router;

use super::handlers::{check_registration, create_event, register_participant, this_month};
use crate::adapters::http::state::AppState;

/// # Routes
/// - `POST /` - Create an event
/// - `GET /this-month` - Events in the current UTC month
/// - `POST /registrations` - Register a member for an event
/// - `GET /registrations/check` - Whether a member is registered
pub fn event_routes() -> Router<AppState> {
    Router::new()
        .route("/", post(create_event))
        .route("/this-month", get(this_month))
        .route("/registrations", post(register_participant))
        .route("/registrations/check", get(check_registration))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use chrono::{Datelike, Utc};
    use serde_json::{json, Value};
    use tower::ServiceExt;

    use crate::adapters::http::test_support::{read_json, TestApp};

    fn post_json(uri: &str, body: Value) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri(uri)
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    fn get(uri: &str) -> Request<Body> {
        Request::builder().uri(uri).body(Body::empty()).unwrap()
    }

    // ════════════════════════════════════════════════════════════════════════════
    // Events
    // ════════════════════════════════════════════════════════════════════════════

    #[tokio::test]
    async fn create_defaults_status_to_upcoming() {
        let app = TestApp::new();

        let response = event_routes()
            .with_state(app.state())
            .oneshot(post_json(
                "/",
                json!({
                    "name": "Hackathon",
                    "event_date": "2026-03-14",
                    "time_from": "09:00",
                    "time_to": "17:30:00",
                    "max_participants": "40"
                }),
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::CREATED);
        let body = read_json(response).await;
        assert_eq!(body["event"]["status"], "upcoming");
        assert_eq!(body["event"]["time_from"], "09:00:00");
        assert_eq!(body["event"]["max_participants"], 40);
    }

    #[tokio::test]
    async fn unknown_status_is_rejected() {
        let app = TestApp::new();

        let response = event_routes()
            .with_state(app.state())
            .oneshot(post_json(
                "/",
                json!({
                    "name": "Hackathon",
                    "event_date": "2026-03-14",
                    "time_from": "09:00",
                    "time_to": "17:00",
                    "status": "postponed"
                }),
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn this_month_only_lists_current_month() {
        let app = TestApp::new();
        let today = Utc::now().date_naive();
        app.seed_event("Now", today).await;
        app.seed_event("Later", today + chrono::Duration::days(62)).await;

        let body = read_json(
            event_routes()
                .with_state(app.state())
                .oneshot(get("/this-month"))
                .await
                .unwrap(),
        )
        .await;

        assert_eq!(body["count"], 1);
        assert_eq!(body["events"][0]["name"], "Now");
        assert_eq!(body["month"], today.month());
        assert_eq!(body["year"], today.year());
    }

    // ════════════════════════════════════════════════════════════════════════════
    // Registrations
    // ════════════════════════════════════════════════════════════════════════════

    #[tokio::test]
    async fn second_registration_is_409() {
        let app = TestApp::new();
        let member = app.seed_member("2021-0200").await;
        let event = app.seed_event("Hackathon", Utc::now().date_naive()).await;
        let router = event_routes().with_state(app.state());
        let body = json!({"event_id": event.id, "member_id": member.id});

        let first = router
            .clone()
            .oneshot(post_json("/registrations", body.clone()))
            .await
            .unwrap();
        let second = router
            .oneshot(post_json("/registrations", body))
            .await
            .unwrap();

        assert_eq!(first.status(), StatusCode::CREATED);
        let first = read_json(first).await;
        assert_eq!(first["registration"]["event_id"], event.id.value());
        assert_eq!(second.status(), StatusCode::CONFLICT);
        assert_eq!(app.events.registration_count().await, 1);
    }

    #[tokio::test]
    async fn zero_ids_are_400() {
        let app = TestApp::new();

        let response = event_routes()
            .with_state(app.state())
            .oneshot(post_json(
                "/registrations",
                json!({"event_id": 0, "member_id": 1}),
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn unknown_member_is_404() {
        let app = TestApp::new();
        let event = app.seed_event("Hackathon", Utc::now().date_naive()).await;

        let response = event_routes()
            .with_state(app.state())
            .oneshot(post_json(
                "/registrations",
                json!({"event_id": event.id, "member_id": 77}),
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert_eq!(read_json(response).await["message"], "Member not found");
    }

    #[tokio::test]
    async fn check_reports_registration() {
        let app = TestApp::new();
        let member = app.seed_member("2021-0201").await;
        let event = app.seed_event("Hackathon", Utc::now().date_naive()).await;
        let router = event_routes().with_state(app.state());
        router
            .clone()
            .oneshot(post_json(
                "/registrations",
                json!({"event_id": event.id, "member_id": member.id}),
            ))
            .await
            .unwrap();

        let uri = format!(
            "/registrations/check?event_id={}&member_id={}",
            event.id, member.id
        );
        let body = read_json(router.oneshot(get(&uri)).await.unwrap()).await;

        assert_eq!(body["is_registered"], true);
        assert_eq!(body["member_id"], member.id.value());
    }
}
