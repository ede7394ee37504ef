//! UserRepository port for local user accounts.

use async_trait::async_trait;

use crate::domain::foundation::{DomainError, FirebaseUid, Page, PageRequest, UserId};
use crate::domain::user::{NewUser, User};

/// Persistence for local user accounts.
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Insert a user and its empty profile in one transaction.
    ///
    /// Returns `Conflict` when the email or uid is already taken.
    async fn create_with_profile(&self, user: &NewUser) -> Result<User, DomainError>;

    async fn find_by_id(&self, id: UserId) -> Result<Option<User>, DomainError>;

    async fn find_by_firebase_uid(&self, uid: &FirebaseUid) -> Result<Option<User>, DomainError>;

    /// First user carrying the given school ID number.
    async fn find_by_school_id(&self, id_school_number: &str) -> Result<Option<User>, DomainError>;

    /// Users with the `user` role, newest first.
    async fn list_students(&self, page: PageRequest) -> Result<Page<User>, DomainError>;

    /// Stored password hash. `Ok(None)` means the user has no local password
    /// or does not exist.
    async fn find_password_hash(&self, id: UserId) -> Result<Option<String>, DomainError>;

    async fn update_password_hash(&self, id: UserId, hash: &str) -> Result<(), DomainError>;
}
