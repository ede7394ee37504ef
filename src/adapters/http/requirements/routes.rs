//! Router for `/api/requirements`.

use axum::routing::{get, put};
use axum::Router;

use super::handlers::{
    archive_requirement, create_requirement, list_requirements, record_compliance,
    update_requirement,
};
use crate::adapters::http::state::AppState;

/// # Routes
/// - `GET /` - Paginated list with compliance tallies
/// - `POST /` - Create a requirement (admin)
/// - `PUT /:id` - Partial update (admin)
/// - `DELETE /:id` - Archive (admin)
/// - `PUT /:id/compliance` - Upsert a member's compliance record (admin)
pub fn requirement_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_requirements).post(create_requirement))
        .route("/:id", put(update_requirement).delete(archive_requirement))
        .route("/:id/compliance", put(record_compliance))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::{header::AUTHORIZATION, Request, StatusCode};
    use serde_json::{json, Value};
    use tower::ServiceExt;

    use crate::adapters::http::test_support::{read_json, TestApp};
    use crate::domain::user::Role;

    fn send(method: &str, uri: &str, token: Option<&str>, body: Option<Value>) -> Request<Body> {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(token) = token {
            builder = builder.header(AUTHORIZATION, format!("Bearer {}", token));
        }
        match body {
            Some(body) => builder
                .header("content-type", "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        }
    }

    fn new_requirement(name: &str, date: &str) -> Value {
        json!({"name": name, "requirementDate": date, "description": "Bring a copy"})
    }

    // ════════════════════════════════════════════════════════════════════════════
    // Authorization
    // ════════════════════════════════════════════════════════════════════════════

    #[tokio::test]
    async fn create_without_token_is_401() {
        let app = TestApp::new();

        let response = app
            .router(requirement_routes())
            .oneshot(send("POST", "/", None, Some(new_requirement("ID photo", "2025-06-01"))))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn create_as_regular_user_is_403() {
        let app = TestApp::new();
        app.seed_caller("user-tok", "uid-user", Role::User).await;

        let response = app
            .router(requirement_routes())
            .oneshot(send(
                "POST",
                "/",
                Some("user-tok"),
                Some(new_requirement("ID photo", "2025-06-01")),
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::FORBIDDEN);
    }

    // ════════════════════════════════════════════════════════════════════════════
    // Mutations
    // ════════════════════════════════════════════════════════════════════════════

    #[tokio::test]
    async fn admin_creates_updates_and_archives() {
        let app = TestApp::new();
        app.seed_caller("admin-tok", "uid-admin", Role::Admin).await;
        let router = app.router(requirement_routes());

        let created = router
            .clone()
            .oneshot(send(
                "POST",
                "/",
                Some("admin-tok"),
                Some(new_requirement("ID photo", "2025-06-01")),
            ))
            .await
            .unwrap();
        assert_eq!(created.status(), StatusCode::CREATED);
        let created = read_json(created).await;
        assert_eq!(created["requirement"]["status"], "open");
        assert_eq!(created["requirement"]["requirement_date"], "2025-06-01");

        let updated = router
            .clone()
            .oneshot(send(
                "PUT",
                "/1",
                Some("admin-tok"),
                Some(json!({"status": "closed"})),
            ))
            .await
            .unwrap();
        assert_eq!(updated.status(), StatusCode::OK);
        let updated = read_json(updated).await;
        assert_eq!(updated["requirement"]["status"], "closed");
        assert_eq!(updated["requirement"]["name"], "ID photo");

        let archived = router
            .oneshot(send("DELETE", "/1", Some("admin-tok"), None))
            .await
            .unwrap();
        assert_eq!(archived.status(), StatusCode::OK);
        assert_eq!(read_json(archived).await["id"], 1);
    }

    #[tokio::test]
    async fn short_name_is_rejected() {
        let app = TestApp::new();
        app.seed_caller("admin-tok", "uid-admin", Role::Admin).await;

        let response = app
            .router(requirement_routes())
            .oneshot(send(
                "POST",
                "/",
                Some("admin-tok"),
                Some(new_requirement("ID", "2025-06-01")),
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn archiving_unknown_requirement_is_404() {
        let app = TestApp::new();
        app.seed_caller("admin-tok", "uid-admin", Role::Admin).await;

        let response = app
            .router(requirement_routes())
            .oneshot(send("DELETE", "/42", Some("admin-tok"), None))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    // ════════════════════════════════════════════════════════════════════════════
    // Listing
    // ════════════════════════════════════════════════════════════════════════════

    #[tokio::test]
    async fn listing_folds_compliance_into_stats() {
        let app = TestApp::new();
        app.seed_caller("admin-tok", "uid-admin", Role::Admin).await;
        let first = app.seed_member("2021-0300").await;
        let second = app.seed_member("2021-0301").await;
        let router = app.router(requirement_routes());

        for (name, date) in [("Late form", "2025-07-01"), ("Early form", "2025-01-15")] {
            router
                .clone()
                .oneshot(send("POST", "/", Some("admin-tok"), Some(new_requirement(name, date))))
                .await
                .unwrap();
        }
        for (member, status) in [(first.id, "complied"), (second.id, "not_complied")] {
            let response = router
                .clone()
                .oneshot(send(
                    "PUT",
                    "/1/compliance",
                    Some("admin-tok"),
                    Some(json!({"member_id": member, "status": status})),
                ))
                .await
                .unwrap();
            assert_eq!(response.status(), StatusCode::OK);
        }

        let body = read_json(
            router
                .oneshot(send("GET", "/?status=bogus", None, None))
                .await
                .unwrap(),
        )
        .await;

        let requirements = body["requirements"].as_array().unwrap();
        assert_eq!(requirements.len(), 2);
        assert_eq!(requirements[0]["name"], "Early form");
        assert_eq!(requirements[0]["complianceStats"]["total"], 0);
        let stats = &requirements[1]["complianceStats"];
        assert_eq!(stats["complied"], 1);
        assert_eq!(stats["notComplied"], 1);
        assert_eq!(stats["pending"], 0);
        assert_eq!(stats["total"], 2);
        assert_eq!(body["pagination"]["total"], 2);
    }

    #[tokio::test]
    async fn compliance_for_unknown_member_is_404() {
        let app = TestApp::new();
        app.seed_caller("admin-tok", "uid-admin", Role::Admin).await;
        let router = app.router(requirement_routes());
        router
            .clone()
            .oneshot(send(
                "POST",
                "/",
                Some("admin-tok"),
                Some(new_requirement("ID photo", "2025-06-01")),
            ))
            .await
            .unwrap();

        let response = router
            .oneshot(send(
                "PUT",
                "/1/compliance",
                Some("admin-tok"),
                Some(json!({"member_id": 99, "status": "pending"})),
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }
}
