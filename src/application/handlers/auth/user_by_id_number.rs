//! GetUserByIdNumberHandler - Looks up a local user by school ID number.

use std::sync::Arc;

use crate::domain::foundation::{non_blank, DomainError};
use crate::domain::user::User;
use crate::ports::UserRepository;

#[derive(Debug, Clone)]
pub struct GetUserByIdNumberQuery {
    pub id_school_number: Option<String>,
}

pub struct GetUserByIdNumberHandler {
    users: Arc<dyn UserRepository>,
}

impl GetUserByIdNumberHandler {
    pub fn new(users: Arc<dyn UserRepository>) -> Self {
        Self { users }
    }

    pub async fn handle(&self, query: GetUserByIdNumberQuery) -> Result<User, DomainError> {
        let id_school_number = non_blank(query.id_school_number).ok_or_else(|| {
            DomainError::validation(
                "ID number is required",
                vec!["ID number is required".to_string()],
            )
        })?;

        self.users
            .find_by_school_id(&id_school_number)
            .await?
            .ok_or_else(|| DomainError::not_found("User not found"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::memory::InMemoryUserStore;
    use crate::domain::foundation::{ErrorCode, FirebaseUid};
    use crate::domain::user::{NewUser, Role};

    async fn store_with_student() -> InMemoryUserStore {
        let users = InMemoryUserStore::new();
        users
            .create_with_profile(&NewUser {
                first_name: "Juan".into(),
                last_name: "Dela Cruz".into(),
                email: "juan@example.edu".into(),
                email_verified: false,
                firebase_uid: Some(FirebaseUid::new("uid-juan").unwrap()),
                id_school_number: Some("2021-00123".into()),
                role: Role::User,
                password_hash: None,
            })
            .await
            .unwrap();
        users
    }

    fn query(id: Option<&str>) -> GetUserByIdNumberQuery {
        GetUserByIdNumberQuery {
            id_school_number: id.map(String::from),
        }
    }

    #[tokio::test]
    async fn finds_user_by_school_id() {
        let handler = GetUserByIdNumberHandler::new(Arc::new(store_with_student().await));

        let user = handler.handle(query(Some("2021-00123"))).await.unwrap();

        assert_eq!(user.name, "Juan Dela Cruz");
    }

    #[tokio::test]
    async fn blank_id_is_rejected() {
        let handler = GetUserByIdNumberHandler::new(Arc::new(InMemoryUserStore::new()));

        let err = handler.handle(query(Some("  "))).await.unwrap_err();

        assert_eq!(err.code, ErrorCode::ValidationFailed);
        assert_eq!(err.message, "ID number is required");
    }

    #[tokio::test]
    async fn unknown_id_is_not_found() {
        let handler = GetUserByIdNumberHandler::new(Arc::new(store_with_student().await));

        let err = handler.handle(query(Some("1999-0001"))).await.unwrap_err();

        assert_eq!(err.code, ErrorCode::NotFound);
    }
}
