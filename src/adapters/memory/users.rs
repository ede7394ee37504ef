//! In-memory users and profiles.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::domain::foundation::{DomainError, FirebaseUid, Page, PageRequest, Timestamp, UserId};
use crate::domain::user::{full_name, AccountDetails, NewUser, Profile, ProfileDetails, Role, User};
use crate::ports::{ProfileRepository, UserRepository};

/// Width of the `profiles.phone_number` column.
const PHONE_NUMBER_MAX: usize = 20;

#[derive(Debug, Clone)]
struct StoredUser {
    user: User,
    password_hash: Option<String>,
}

#[derive(Debug, Default)]
struct State {
    users: Vec<StoredUser>,
    profiles: Vec<Profile>,
    next_user_id: i64,
    next_profile_id: i64,
}

/// Users and their profiles behind one lock, so account edits are atomic.
#[derive(Debug, Clone, Default)]
pub struct InMemoryUserStore {
    state: Arc<RwLock<State>>,
    fail_inserts: Arc<AtomicBool>,
}

impl InMemoryUserStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Makes every subsequent `create_with_profile` fail with a database error.
    pub fn fail_inserts(&self, fail: bool) {
        self.fail_inserts.store(fail, Ordering::SeqCst);
    }

    pub async fn user_count(&self) -> usize {
        self.state.read().await.users.len()
    }

    /// Changes a user's role, e.g. to seed an administrator.
    pub async fn set_role(&self, id: UserId, role: Role) {
        let mut state = self.state.write().await;
        if let Some(stored) = state.users.iter_mut().find(|s| s.user.id == id) {
            stored.user.role = role;
        }
    }

    async fn find(&self, pred: impl Fn(&User) -> bool) -> Option<User> {
        self.state
            .read()
            .await
            .users
            .iter()
            .map(|s| &s.user)
            .find(|u| pred(u))
            .cloned()
    }
}

#[async_trait]
impl UserRepository for InMemoryUserStore {
    async fn create_with_profile(&self, new: &NewUser) -> Result<User, DomainError> {
        if self.fail_inserts.load(Ordering::SeqCst) {
            return Err(DomainError::database("Failed to insert user: simulated failure"));
        }

        let mut state = self.state.write().await;
        if state.users.iter().any(|s| s.user.email == new.email) {
            return Err(DomainError::conflict("A user with this email already exists"));
        }
        if new.firebase_uid.is_some()
            && state
                .users
                .iter()
                .any(|s| s.user.firebase_uid == new.firebase_uid)
        {
            return Err(DomainError::conflict("User already exists"));
        }

        state.next_user_id += 1;
        state.next_profile_id += 1;
        let now = Timestamp::now();
        let user = User {
            id: UserId::from_db(state.next_user_id),
            first_name: new.first_name.clone(),
            last_name: new.last_name.clone(),
            name: full_name(&new.first_name, &new.last_name),
            email: new.email.clone(),
            email_verified_at: new.email_verified.then_some(now),
            firebase_uid: new.firebase_uid.clone(),
            id_school_number: new.id_school_number.clone(),
            role: new.role,
            created_at: now,
            updated_at: now,
        };
        let profile = Profile {
            id: state.next_profile_id,
            user_id: user.id,
            first_name: new.first_name.clone(),
            last_name: new.last_name.clone(),
            display_name: None,
            phone_number: None,
            bio: None,
            gender: None,
            email: None,
            id_school_number: None,
        };

        state.users.push(StoredUser {
            user: user.clone(),
            password_hash: new.password_hash.clone(),
        });
        state.profiles.push(profile);
        Ok(user)
    }

    async fn find_by_id(&self, id: UserId) -> Result<Option<User>, DomainError> {
        Ok(self.find(|u| u.id == id).await)
    }

    async fn find_by_firebase_uid(&self, uid: &FirebaseUid) -> Result<Option<User>, DomainError> {
        Ok(self.find(|u| u.firebase_uid.as_ref() == Some(uid)).await)
    }

    async fn find_by_school_id(&self, id_school_number: &str) -> Result<Option<User>, DomainError> {
        Ok(self
            .find(|u| u.id_school_number.as_deref() == Some(id_school_number))
            .await)
    }

    async fn list_students(&self, page: PageRequest) -> Result<Page<User>, DomainError> {
        let state = self.state.read().await;
        let mut students: Vec<User> = state
            .users
            .iter()
            .map(|s| s.user.clone())
            .filter(|u| u.role == Role::User)
            .collect();
        students.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id)));

        let total = students.len() as i64;
        let items = students
            .into_iter()
            .skip(page.offset() as usize)
            .take(page.limit() as usize)
            .collect();
        Ok(Page::new(items, page, total))
    }

    async fn find_password_hash(&self, id: UserId) -> Result<Option<String>, DomainError> {
        Ok(self
            .state
            .read()
            .await
            .users
            .iter()
            .find(|s| s.user.id == id)
            .and_then(|s| s.password_hash.clone()))
    }

    async fn update_password_hash(&self, id: UserId, hash: &str) -> Result<(), DomainError> {
        let mut state = self.state.write().await;
        let stored = state
            .users
            .iter_mut()
            .find(|s| s.user.id == id)
            .ok_or_else(|| DomainError::not_found("User not found"))?;
        stored.password_hash = Some(hash.to_string());
        stored.user.updated_at = Timestamp::now();
        Ok(())
    }
}

#[async_trait]
impl ProfileRepository for InMemoryUserStore {
    async fn find_by_user(&self, user_id: UserId) -> Result<Option<Profile>, DomainError> {
        let state = self.state.read().await;
        let Some(profile) = state.profiles.iter().find(|p| p.user_id == user_id) else {
            return Ok(None);
        };
        let user = state.users.iter().find(|s| s.user.id == user_id);

        Ok(Some(Profile {
            email: user.map(|s| s.user.email.clone()),
            id_school_number: user.and_then(|s| s.user.id_school_number.clone()),
            ..profile.clone()
        }))
    }

    async fn update_details(
        &self,
        user_id: UserId,
        details: &ProfileDetails,
    ) -> Result<bool, DomainError> {
        let mut state = self.state.write().await;
        match state.profiles.iter_mut().find(|p| p.user_id == user_id) {
            Some(profile) => {
                profile.display_name = Some(details.display_name.clone());
                profile.bio = Some(details.bio.clone());
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn update_account(
        &self,
        user_id: UserId,
        account: &AccountDetails,
    ) -> Result<(), DomainError> {
        let mut state = self.state.write().await;

        let user_idx = state
            .users
            .iter()
            .position(|s| s.user.id == user_id)
            .ok_or_else(|| DomainError::not_found("User not found"))?;
        if state
            .users
            .iter()
            .any(|s| s.user.id != user_id && s.user.email == account.email)
        {
            return Err(DomainError::conflict("A user with this email already exists"));
        }
        let profile_idx = state
            .profiles
            .iter()
            .position(|p| p.user_id == user_id)
            .ok_or_else(|| DomainError::not_found("Profile not found"))?;
        if account.phone_number.chars().count() > PHONE_NUMBER_MAX {
            return Err(DomainError::database(
                "Failed to update profile account fields: value too long for phone_number",
            ));
        }

        // All checks passed; apply both writes together.
        let user = &mut state.users[user_idx].user;
        user.email = account.email.clone();
        user.updated_at = Timestamp::now();
        let profile = &mut state.profiles[profile_idx];
        profile.phone_number = Some(account.phone_number.clone());
        profile.gender = Some(account.gender.clone());
        Ok(())
    }
}
