//! Identity provider port for account administration.
//!
//! Token verification lives in `TokenVerifier`. This port covers the
//! administrative side: looking up, creating and deleting remote accounts
//! and minting custom sign-in tokens.
//!
//! Server-side sign-up is the only flow that writes to the provider. It
//! creates the remote account first and deletes it again when the local
//! insert fails.

use async_trait::async_trait;

use crate::domain::foundation::{AuthError, FirebaseUid, NewRemoteIdentity, RemoteIdentity};

/// Administrative access to the identity provider.
///
/// # Contract
///
/// Implementations must:
/// - Return `AuthError::UserNotFound` when no account has the given uid
/// - Return `AuthError::EmailExists` when creating a duplicate account
/// - Return `AuthError::ServiceUnavailable` for transport or provider faults
#[async_trait]
pub trait IdentityProvider: Send + Sync {
    /// Fetch an account by uid.
    async fn get_user(&self, uid: &FirebaseUid) -> Result<RemoteIdentity, AuthError>;

    /// Create an email/password account.
    async fn create_user(&self, request: &NewRemoteIdentity) -> Result<RemoteIdentity, AuthError>;

    /// Delete an account.
    async fn delete_user(&self, uid: &FirebaseUid) -> Result<(), AuthError>;

    /// Mint a custom token the client can exchange for an ID token.
    async fn create_custom_token(&self, uid: &FirebaseUid) -> Result<String, AuthError>;
}
