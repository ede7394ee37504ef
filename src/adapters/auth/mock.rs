//! Mock identity adapters for testing.
//!
//! These adapters implement the `TokenVerifier` and `IdentityProvider` ports
//! without talking to Firebase.
//!
//! # Example
//!
//! ```ignore
//! use orgdesk::adapters::auth::MockTokenVerifier;
//!
//! let verifier = MockTokenVerifier::new().with_test_user("valid-token", "uid-1");
//! let user = verifier.verify("valid-token").await?;
//! ```

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::RwLock;

use async_trait::async_trait;

use crate::domain::foundation::{
    AuthError, AuthenticatedUser, FirebaseUid, NewRemoteIdentity, RemoteIdentity,
};
use crate::ports::{IdentityProvider, TokenVerifier};

fn test_uid(uid: &str) -> FirebaseUid {
    FirebaseUid::new(uid).expect("mock uid must be valid")
}

/// Mock token verifier.
///
/// Tokens not registered with the mock are rejected with `InvalidToken`.
#[derive(Debug, Default)]
pub struct MockTokenVerifier {
    tokens: RwLock<HashMap<String, AuthenticatedUser>>,
    force_error: RwLock<Option<AuthError>>,
}

impl MockTokenVerifier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_user(self, token: impl Into<String>, user: AuthenticatedUser) -> Self {
        self.add_token(token, user);
        self
    }

    /// Registers a token for a verified user with a derived email.
    pub fn with_test_user(self, token: impl Into<String>, uid: &str) -> Self {
        let user = AuthenticatedUser::new(
            test_uid(uid),
            Some(format!("{}@test.example.com", uid)),
            true,
        );
        self.with_user(token, user)
    }

    /// Forces every verification to fail with `error`.
    pub fn with_error(self, error: AuthError) -> Self {
        *self.force_error.write().unwrap() = Some(error);
        self
    }

    pub fn clear_error(&self) {
        *self.force_error.write().unwrap() = None;
    }

    pub fn add_token(&self, token: impl Into<String>, user: AuthenticatedUser) {
        self.tokens.write().unwrap().insert(token.into(), user);
    }

    pub fn remove_token(&self, token: &str) {
        self.tokens.write().unwrap().remove(token);
    }
}

#[async_trait]
impl TokenVerifier for MockTokenVerifier {
    async fn verify(&self, token: &str) -> Result<AuthenticatedUser, AuthError> {
        if let Some(error) = self.force_error.read().unwrap().clone() {
            return Err(error);
        }

        self.tokens
            .read()
            .unwrap()
            .get(token)
            .cloned()
            .ok_or(AuthError::InvalidToken)
    }
}

/// Mock identity provider backed by an in-memory account map.
///
/// Created accounts get sequential uids (`mock-uid-1`, ...). Deletions are
/// recorded so tests can assert that a compensating delete happened.
#[derive(Debug, Default)]
pub struct MockIdentityProvider {
    users: RwLock<HashMap<String, RemoteIdentity>>,
    deleted: RwLock<Vec<FirebaseUid>>,
    next_uid: AtomicU64,
    force_error: RwLock<Option<AuthError>>,
    delete_error: RwLock<Option<AuthError>>,
}

impl MockIdentityProvider {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_user(self, user: RemoteIdentity) -> Self {
        self.add_user(user);
        self
    }

    /// Adds a verified account with a derived email.
    pub fn with_test_user(self, uid: &str) -> Self {
        self.with_user(RemoteIdentity {
            uid: test_uid(uid),
            email: Some(format!("{}@test.example.com", uid)),
            email_verified: true,
            display_name: None,
            disabled: false,
        })
    }

    /// Forces every call except deletion to fail with `error`.
    pub fn with_error(self, error: AuthError) -> Self {
        *self.force_error.write().unwrap() = Some(error);
        self
    }

    /// Makes `delete_user` fail with `error`.
    pub fn with_delete_error(self, error: AuthError) -> Self {
        *self.delete_error.write().unwrap() = Some(error);
        self
    }

    pub fn clear_error(&self) {
        *self.force_error.write().unwrap() = None;
    }

    pub fn add_user(&self, user: RemoteIdentity) {
        self.users
            .write()
            .unwrap()
            .insert(user.uid.as_str().to_string(), user);
    }

    pub fn user_count(&self) -> usize {
        self.users.read().unwrap().len()
    }

    /// Uids passed to `delete_user`, in call order.
    pub fn deleted_uids(&self) -> Vec<FirebaseUid> {
        self.deleted.read().unwrap().clone()
    }

    fn check_forced(&self) -> Result<(), AuthError> {
        match self.force_error.read().unwrap().clone() {
            Some(error) => Err(error),
            None => Ok(()),
        }
    }
}

#[async_trait]
impl IdentityProvider for MockIdentityProvider {
    async fn get_user(&self, uid: &FirebaseUid) -> Result<RemoteIdentity, AuthError> {
        self.check_forced()?;
        self.users
            .read()
            .unwrap()
            .get(uid.as_str())
            .cloned()
            .ok_or(AuthError::UserNotFound)
    }

    async fn create_user(&self, request: &NewRemoteIdentity) -> Result<RemoteIdentity, AuthError> {
        self.check_forced()?;

        let mut users = self.users.write().unwrap();
        if users
            .values()
            .any(|u| u.email.as_deref() == Some(request.email.as_str()))
        {
            return Err(AuthError::EmailExists);
        }

        let n = self.next_uid.fetch_add(1, Ordering::SeqCst) + 1;
        let identity = RemoteIdentity {
            uid: test_uid(&format!("mock-uid-{}", n)),
            email: Some(request.email.clone()),
            email_verified: false,
            display_name: request.display_name.clone(),
            disabled: false,
        };
        users.insert(identity.uid.as_str().to_string(), identity.clone());
        Ok(identity)
    }

    async fn delete_user(&self, uid: &FirebaseUid) -> Result<(), AuthError> {
        self.deleted.write().unwrap().push(uid.clone());
        if let Some(error) = self.delete_error.read().unwrap().clone() {
            return Err(error);
        }
        self.users
            .write()
            .unwrap()
            .remove(uid.as_str())
            .map(|_| ())
            .ok_or(AuthError::UserNotFound)
    }

    async fn create_custom_token(&self, uid: &FirebaseUid) -> Result<String, AuthError> {
        self.check_forced()?;
        Ok(format!("custom-token-{}", uid))
    }
}
