//! Authentication types for the domain layer.
//!
//! These types describe an identity verified by the external identity
//! provider. They carry no provider dependencies; the Firebase adapter and
//! the test mock both populate them through the identity ports.

use serde_json::{Map, Value};
use thiserror::Error;

use super::{DomainError, ErrorCode, FirebaseUid};

/// Identity extracted from a verified provider ID token.
#[derive(Debug, Clone)]
pub struct AuthenticatedUser {
    /// The provider's subject identifier (`sub` claim).
    pub uid: FirebaseUid,

    /// Email address from the token claims, when present.
    pub email: Option<String>,

    /// Whether the provider has verified the email address.
    pub email_verified: bool,

    /// Every claim in the verified token, passed back to clients as-is.
    pub claims: Map<String, Value>,
}

impl AuthenticatedUser {
    pub fn new(uid: FirebaseUid, email: Option<String>, email_verified: bool) -> Self {
        Self {
            uid,
            email,
            email_verified,
            claims: Map::new(),
        }
    }

    pub fn with_claims(mut self, claims: Map<String, Value>) -> Self {
        self.claims = claims;
        self
    }
}

/// A user account as held by the identity provider.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemoteIdentity {
    pub uid: FirebaseUid,
    pub email: Option<String>,
    pub email_verified: bool,
    pub display_name: Option<String>,
    pub disabled: bool,
}

/// Request to create an account at the identity provider.
#[derive(Debug, Clone)]
pub struct NewRemoteIdentity {
    pub email: String,
    pub password: String,
    pub display_name: Option<String>,
}

/// Authentication errors reported by the identity ports.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AuthError {
    /// The token is missing, malformed, or has an invalid signature.
    #[error("Invalid or expired ID token")]
    InvalidToken,

    /// The token has expired.
    #[error("Token expired")]
    TokenExpired,

    /// The provider has no account for the given uid.
    #[error("User not found")]
    UserNotFound,

    /// An account with this email already exists at the provider.
    #[error("Email already exists")]
    EmailExists,

    /// The provider rejected the request (weak password, bad email, ...).
    #[error("Identity provider rejected the request: {0}")]
    Rejected(String),

    /// The provider could not be reached or answered unexpectedly.
    #[error("Identity provider unavailable: {0}")]
    ServiceUnavailable(String),
}

impl AuthError {
    pub fn service_unavailable(message: impl Into<String>) -> Self {
        Self::ServiceUnavailable(message.into())
    }

    /// Returns true if the caller should obtain a fresh token.
    pub fn requires_reauthentication(&self) -> bool {
        matches!(self, AuthError::InvalidToken | AuthError::TokenExpired)
    }
}

impl From<AuthError> for DomainError {
    fn from(err: AuthError) -> Self {
        match err {
            AuthError::InvalidToken | AuthError::TokenExpired => {
                DomainError::unauthorized(err.to_string())
            }
            AuthError::UserNotFound => DomainError::not_found("Identity not found"),
            AuthError::EmailExists => DomainError::conflict("Email is already registered"),
            AuthError::Rejected(reason) => {
                DomainError::validation("Identity provider rejected the request", vec![reason])
            }
            AuthError::ServiceUnavailable(msg) => {
                DomainError::new(ErrorCode::IdentityProviderUnavailable, msg)
            }
        }
    }
}
