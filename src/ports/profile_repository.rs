//! ProfileRepository port for user profile persistence.

use async_trait::async_trait;

use crate::domain::{
    foundation::{DomainError, UserId},
    user::{AccountDetails, Profile, ProfileDetails},
};

/// Repository for user profiles.
#[async_trait]
pub trait ProfileRepository: Send + Sync {
    /// Profile joined with the owner's email and school ID.
    async fn find_by_user(&self, user_id: UserId) -> Result<Option<Profile>, DomainError>;

    /// Overwrite display name and bio. Returns `false` when no profile exists.
    async fn update_details(
        &self,
        user_id: UserId,
        details: &ProfileDetails,
    ) -> Result<bool, DomainError>;

    /// Update the user's email and the profile's phone and gender atomically.
    ///
    /// Returns `NotFound` when the user or profile is absent. Any failure
    /// leaves both rows unchanged.
    async fn update_account(
        &self,
        user_id: UserId,
        account: &AccountDetails,
    ) -> Result<(), DomainError>;
}
