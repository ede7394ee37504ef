//! Conversion of domain errors into HTTP responses.
//!
//! Every failure leaves the API as `{success: false, code, message, errors?}`.
//! Server faults are logged in full and reported with a generic message.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

use crate::domain::foundation::{AuthError, DomainError, ErrorCode};

/// Error body shared by every endpoint.
#[derive(Debug, Clone, Serialize)]
pub struct ErrorResponse {
    pub success: bool,
    pub code: String,
    pub message: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub errors: Vec<String>,
}

impl ErrorResponse {
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            success: false,
            code: code.into(),
            message: message.into(),
            errors: Vec::new(),
        }
    }

    pub fn with_errors(mut self, errors: Vec<String>) -> Self {
        self.errors = errors;
        self
    }
}

/// HTTP status for each error category.
pub fn status_for(code: ErrorCode) -> StatusCode {
    match code {
        ErrorCode::ValidationFailed | ErrorCode::MissingFields => StatusCode::BAD_REQUEST,
        ErrorCode::Unauthorized => StatusCode::UNAUTHORIZED,
        ErrorCode::Forbidden => StatusCode::FORBIDDEN,
        ErrorCode::NotFound => StatusCode::NOT_FOUND,
        ErrorCode::Conflict => StatusCode::CONFLICT,
        ErrorCode::IdentityProviderUnavailable => StatusCode::BAD_GATEWAY,
        ErrorCode::DatabaseError | ErrorCode::InternalError => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

/// API error type wrapping a `DomainError`.
#[derive(Debug)]
pub struct ApiError(pub DomainError);

impl ApiError {
    pub fn bad_request(message: impl Into<String>) -> Self {
        let message = message.into();
        Self(DomainError::validation(message.clone(), vec![message]))
    }
}

impl From<DomainError> for ApiError {
    fn from(err: DomainError) -> Self {
        Self(err)
    }
}

impl From<AuthError> for ApiError {
    fn from(err: AuthError) -> Self {
        Self(err.into())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let DomainError {
            code,
            message,
            errors,
        } = self.0;
        let status = status_for(code);

        let body = match code {
            ErrorCode::DatabaseError | ErrorCode::InternalError => {
                tracing::error!(%code, error = %message, "Request failed");
                ErrorResponse::new(code.to_string(), "Internal server error")
            }
            ErrorCode::IdentityProviderUnavailable => {
                tracing::error!(%code, error = %message, "Identity provider unavailable");
                ErrorResponse::new(code.to_string(), "Identity provider unavailable")
            }
            _ => {
                tracing::debug!(%code, %message, "Request rejected");
                ErrorResponse::new(code.to_string(), message).with_errors(errors)
            }
        };

        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::to_bytes;

    async fn body_json(response: Response) -> serde_json::Value {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[test]
    fn every_code_maps_to_its_status() {
        assert_eq!(status_for(ErrorCode::MissingFields), StatusCode::BAD_REQUEST);
        assert_eq!(status_for(ErrorCode::Unauthorized), StatusCode::UNAUTHORIZED);
        assert_eq!(status_for(ErrorCode::Forbidden), StatusCode::FORBIDDEN);
        assert_eq!(status_for(ErrorCode::NotFound), StatusCode::NOT_FOUND);
        assert_eq!(status_for(ErrorCode::Conflict), StatusCode::CONFLICT);
        assert_eq!(
            status_for(ErrorCode::IdentityProviderUnavailable),
            StatusCode::BAD_GATEWAY
        );
        assert_eq!(
            status_for(ErrorCode::DatabaseError),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[tokio::test]
    async fn validation_error_lists_problems() {
        let err = DomainError::missing_fields(vec!["Name is required".into()]);

        let response = ApiError(err).into_response();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = body_json(response).await;
        assert_eq!(body["success"], false);
        assert_eq!(body["code"], "MISSING_FIELDS");
        assert_eq!(body["message"], "Missing required fields");
        assert_eq!(body["errors"][0], "Name is required");
    }

    #[tokio::test]
    async fn database_error_message_is_hidden() {
        let err = DomainError::database("relation \"members\" does not exist");

        let response = ApiError(err).into_response();

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let body = body_json(response).await;
        assert_eq!(body["message"], "Internal server error");
        assert!(body.get("errors").is_none());
    }

    #[tokio::test]
    async fn provider_outage_is_bad_gateway() {
        let response = ApiError::from(AuthError::service_unavailable("timeout")).into_response();

        assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
    }
}
