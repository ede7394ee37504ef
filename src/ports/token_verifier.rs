//! Token verification port for identity-provider ID tokens.
//!
//! This port defines the contract for verifying an ID token and extracting
//! the caller's identity. The Firebase adapter implements it for production
//! and the mock adapter for tests.
//!
//! # Security Requirements
//!
//! All implementations MUST validate:
//! - **Signature**: against the provider's published signing keys
//! - **Issuer (iss)**: token must come from the configured project
//! - **Audience (aud)**: token must be intended for the configured project
//! - **Expiry (exp)**: token must not be expired

use async_trait::async_trait;

use crate::domain::foundation::{AuthError, AuthenticatedUser};

/// Verifies ID tokens and extracts the caller's identity.
///
/// HTTP middleware uses this to validate Bearer tokens; the auth handlers
/// use it to verify tokens sent in request bodies.
///
/// # Contract
///
/// Implementations must:
/// - Return `AuthError::InvalidToken` for malformed or badly signed tokens
/// - Return `AuthError::TokenExpired` for expired tokens
/// - Return `AuthError::ServiceUnavailable` when signing keys can't be fetched
#[async_trait]
pub trait TokenVerifier: Send + Sync {
    /// Verify a raw ID token (without any "Bearer " prefix).
    async fn verify(&self, token: &str) -> Result<AuthenticatedUser, AuthError>;
}
