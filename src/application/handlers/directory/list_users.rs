//! ListUsersHandler - Student accounts, newest first.

use std::sync::Arc;

use crate::domain::foundation::{DomainError, Page, PageRequest};
use crate::domain::user::User;
use crate::ports::UserRepository;

pub struct ListUsersHandler {
    users: Arc<dyn UserRepository>,
}

impl ListUsersHandler {
    pub fn new(users: Arc<dyn UserRepository>) -> Self {
        Self { users }
    }

    /// Only users with the `user` role are listed.
    pub async fn handle(&self, page: PageRequest) -> Result<Page<User>, DomainError> {
        self.users.list_students(page).await
    }
}
