//! GetProfileHandler - Profile joined with the owner's email and school ID.

use std::sync::Arc;

use crate::domain::foundation::{DomainError, UserId};
use crate::domain::user::Profile;
use crate::ports::ProfileRepository;

pub struct GetProfileHandler {
    profiles: Arc<dyn ProfileRepository>,
}

impl GetProfileHandler {
    pub fn new(profiles: Arc<dyn ProfileRepository>) -> Self {
        Self { profiles }
    }

    pub async fn handle(&self, user_id: UserId) -> Result<Profile, DomainError> {
        self.profiles
            .find_by_user(user_id)
            .await?
            .ok_or_else(|| DomainError::not_found("Profile not found"))
    }
}
