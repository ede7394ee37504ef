//! ChangePasswordHandler - Replaces a user's local password.

use std::sync::Arc;

use crate::domain::foundation::{DomainError, UserId};
use crate::domain::user::PasswordService;
use crate::ports::UserRepository;

#[derive(Debug, Clone, Default)]
pub struct ChangePasswordCommand {
    pub current_password: Option<String>,
    pub new_password: Option<String>,
}

pub struct ChangePasswordHandler {
    users: Arc<dyn UserRepository>,
    passwords: Arc<PasswordService>,
}

impl ChangePasswordHandler {
    pub fn new(users: Arc<dyn UserRepository>, passwords: Arc<PasswordService>) -> Self {
        Self { users, passwords }
    }

    pub async fn handle(&self, user_id: UserId, cmd: ChangePasswordCommand) -> Result<(), DomainError> {
        let current = cmd.current_password.filter(|p| !p.is_empty());
        let new = cmd.new_password.filter(|p| !p.is_empty());

        let (Some(current), Some(new)) = (current, new) else {
            return Err(DomainError::missing_fields(vec![
                "Current password and new password are required".to_string(),
            ]));
        };
        if let Err(errors) = self.passwords.policy().validate(&new) {
            return Err(DomainError::validation("Validation failed", errors));
        }

        if self.users.find_by_id(user_id).await?.is_none() {
            return Err(DomainError::not_found("User not found"));
        }
        let Some(stored_hash) = self.users.find_password_hash(user_id).await? else {
            return Err(DomainError::validation(
                "This account has no local password",
                Vec::new(),
            ));
        };

        if !self.passwords.verify_password(&current, &stored_hash)? {
            tracing::warn!(user_id = %user_id, "Password change rejected: wrong current password");
            return Err(DomainError::unauthorized("Current password is incorrect"));
        }

        let hash = self.passwords.hash_password(&new)?;
        self.users.update_password_hash(user_id, &hash).await?;
        tracing::info!(user_id = %user_id, "Password changed");
        Ok(())
    }
}
