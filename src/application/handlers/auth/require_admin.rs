//! RequireAdminHandler - Gate for administrator-only operations.

use std::sync::Arc;

use crate::domain::foundation::{AuthenticatedUser, DomainError};
use crate::domain::user::User;
use crate::ports::UserRepository;

pub struct RequireAdminHandler {
    users: Arc<dyn UserRepository>,
}

impl RequireAdminHandler {
    pub fn new(users: Arc<dyn UserRepository>) -> Self {
        Self { users }
    }

    /// Returns the caller's local account when it has the admin role.
    pub async fn handle(&self, caller: &AuthenticatedUser) -> Result<User, DomainError> {
        match self.users.find_by_firebase_uid(&caller.uid).await? {
            Some(user) if user.is_admin() => Ok(user),
            _ => {
                tracing::warn!(uid = %caller.uid, "Admin access denied");
                Err(DomainError::forbidden("Admin access required"))
            }
        }
    }
}
