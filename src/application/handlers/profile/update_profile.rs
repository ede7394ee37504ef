//! Profile edits: display fields and account fields.

use std::sync::Arc;

use crate::domain::foundation::{DomainError, UserId};
use crate::domain::user::{AccountDetails, ProfileDetails};
use crate::ports::ProfileRepository;

#[derive(Debug, Clone, Default)]
pub struct UpdateProfileCommand {
    pub display_name: Option<String>,
    pub bio: Option<String>,
}

pub struct UpdateProfileHandler {
    profiles: Arc<dyn ProfileRepository>,
}

impl UpdateProfileHandler {
    pub fn new(profiles: Arc<dyn ProfileRepository>) -> Self {
        Self { profiles }
    }

    pub async fn handle(&self, user_id: UserId, cmd: UpdateProfileCommand) -> Result<(), DomainError> {
        let details = ProfileDetails::parse(cmd.display_name, cmd.bio)?;
        if !self.profiles.update_details(user_id, &details).await? {
            return Err(DomainError::not_found("Profile not found"));
        }
        tracing::debug!(user_id = %user_id, "Profile updated");
        Ok(())
    }
}

#[derive(Debug, Clone, Default)]
pub struct UpdateAccountCommand {
    pub email: Option<String>,
    pub phone_number: Option<String>,
    pub gender: Option<String>,
}

/// Writes the user's email and the profile's phone and gender together.
pub struct UpdateAccountHandler {
    profiles: Arc<dyn ProfileRepository>,
}

impl UpdateAccountHandler {
    pub fn new(profiles: Arc<dyn ProfileRepository>) -> Self {
        Self { profiles }
    }

    pub async fn handle(&self, user_id: UserId, cmd: UpdateAccountCommand) -> Result<(), DomainError> {
        let account = AccountDetails::parse(cmd.email, cmd.phone_number, cmd.gender)?;
        self.profiles.update_account(user_id, &account).await?;
        tracing::info!(user_id = %user_id, "Account details updated");
        Ok(())
    }
}
