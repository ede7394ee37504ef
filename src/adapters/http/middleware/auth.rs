//! Authentication middleware and extractors for axum.
//!
//! - `auth_middleware` validates a Bearer ID token and stores the caller in
//!   the request extensions
//! - `RequireAuth` rejects requests that carry no verified caller
//! - `OptionalAuth` yields the caller when one is present
//!
//! The middleware only depends on the `TokenVerifier` port, so tests run it
//! against `MockTokenVerifier`.
//!
//! ```text
//! Request → auth_middleware → AuthenticatedUser in extensions
//!                                      ↓
//!                              Handler → RequireAuth reads it back
//! ```

use std::sync::Arc;

use axum::{
    async_trait,
    extract::{FromRequestParts, Request, State},
    http::{header::AUTHORIZATION, request::Parts, HeaderMap},
    middleware::Next,
    response::{IntoResponse, Response},
};

use crate::adapters::http::error::ApiError;
use crate::domain::foundation::{AuthenticatedUser, DomainError};
use crate::ports::TokenVerifier;

/// Auth middleware state.
pub type AuthState = Arc<dyn TokenVerifier>;

/// Token from an `Authorization: Bearer <token>` header.
pub fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    headers
        .get(AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .and_then(|h| h.strip_prefix("Bearer "))
        .map(str::trim)
        .filter(|t| !t.is_empty())
}

/// Validates Bearer tokens.
///
/// Requests without a token pass through untouched so public routes keep
/// working; handlers that need a caller use `RequireAuth`. A token that
/// fails verification is rejected here with 401 (or 502 when the provider
/// keys cannot be fetched).
pub async fn auth_middleware(
    State(verifier): State<AuthState>,
    mut request: Request,
    next: Next,
) -> Response {
    let Some(token) = bearer_token(request.headers()) else {
        return next.run(request).await;
    };

    match verifier.verify(token).await {
        Ok(user) => {
            tracing::debug!(uid = %user.uid, "Bearer token verified");
            request.extensions_mut().insert(user);
            next.run(request).await
        }
        Err(e) => {
            tracing::debug!(error = %e, "Bearer token rejected");
            ApiError::from(e).into_response()
        }
    }
}

/// Extractor that requires a verified caller.
#[derive(Debug, Clone)]
pub struct RequireAuth(pub AuthenticatedUser);

#[async_trait]
impl<S> FromRequestParts<S> for RequireAuth
where
    S: Send + Sync,
{
    type Rejection = AuthRejection;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<AuthenticatedUser>()
            .cloned()
            .map(RequireAuth)
            .ok_or(AuthRejection::Unauthenticated)
    }
}

/// Extractor for routes where a caller is optional.
#[derive(Debug, Clone)]
pub struct OptionalAuth(pub Option<AuthenticatedUser>);

#[async_trait]
impl<S> FromRequestParts<S> for OptionalAuth
where
    S: Send + Sync,
{
    type Rejection = std::convert::Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Ok(OptionalAuth(parts.extensions.get::<AuthenticatedUser>().cloned()))
    }
}

/// Rejection type for authentication failures.
#[derive(Debug, Clone)]
pub enum AuthRejection {
    /// No verified token was presented.
    Unauthenticated,
}

impl IntoResponse for AuthRejection {
    fn into_response(self) -> Response {
        match self {
            AuthRejection::Unauthenticated => {
                ApiError(DomainError::unauthorized("Authentication required")).into_response()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::auth::MockTokenVerifier;
    use crate::domain::foundation::{AuthError, FirebaseUid};
    use axum::{
        body::Body,
        http::{Request as HttpRequest, StatusCode},
        middleware,
        routing::get,
        Router,
    };
    use tower::ServiceExt;

    fn test_user() -> AuthenticatedUser {
        AuthenticatedUser::new(
            FirebaseUid::new("uid-123").unwrap(),
            Some("test@example.com".into()),
            true,
        )
    }

    async fn whoami(OptionalAuth(user): OptionalAuth) -> String {
        user.map(|u| u.uid.to_string()).unwrap_or_else(|| "anonymous".into())
    }

    async fn protected(RequireAuth(user): RequireAuth) -> String {
        user.uid.to_string()
    }

    fn app(verifier: MockTokenVerifier) -> Router {
        let state: AuthState = Arc::new(verifier);
        Router::new()
            .route("/whoami", get(whoami))
            .route("/protected", get(protected))
            .layer(middleware::from_fn_with_state(state, auth_middleware))
    }

    fn request(uri: &str, token: Option<&str>) -> HttpRequest<Body> {
        let mut builder = HttpRequest::builder().uri(uri);
        if let Some(token) = token {
            builder = builder.header(AUTHORIZATION, format!("Bearer {}", token));
        }
        builder.body(Body::empty()).unwrap()
    }

    // ════════════════════════════════════════════════════════════════════════════
    // Middleware Tests
    // ════════════════════════════════════════════════════════════════════════════

    #[tokio::test]
    async fn valid_token_injects_caller() {
        let app = app(MockTokenVerifier::new().with_user("good", test_user()));

        let response = app.oneshot(request("/protected", Some("good"))).await.unwrap();

        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn missing_token_passes_through_public_route() {
        let app = app(MockTokenVerifier::new());

        let response = app.oneshot(request("/whoami", None)).await.unwrap();

        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn missing_token_on_protected_route_is_401() {
        let app = app(MockTokenVerifier::new());

        let response = app.oneshot(request("/protected", None)).await.unwrap();

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn invalid_token_is_401_even_on_public_route() {
        let app = app(MockTokenVerifier::new());

        let response = app.oneshot(request("/whoami", Some("forged"))).await.unwrap();

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn unreachable_key_service_is_502() {
        let app = app(
            MockTokenVerifier::new().with_error(AuthError::service_unavailable("jwks timeout")),
        );

        let response = app.oneshot(request("/protected", Some("any"))).await.unwrap();

        assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
    }

    // ════════════════════════════════════════════════════════════════════════════
    // Token Extraction Tests
    // ════════════════════════════════════════════════════════════════════════════

    #[test]
    fn bearer_prefix_is_required() {
        let mut headers = HeaderMap::new();
        headers.insert(AUTHORIZATION, "Bearer abc.def".parse().unwrap());
        assert_eq!(bearer_token(&headers), Some("abc.def"));

        headers.insert(AUTHORIZATION, "Basic dXNlcjpwYXNz".parse().unwrap());
        assert_eq!(bearer_token(&headers), None);

        headers.insert(AUTHORIZATION, "Bearer ".parse().unwrap());
        assert_eq!(bearer_token(&headers), None);
    }

    #[test]
    fn auth_state_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<AuthState>();
        assert_send_sync::<RequireAuth>();
    }
}
