//! CheckMemberHandler - Reports whether a school ID belongs to a member.

use std::sync::Arc;

use crate::domain::foundation::{non_blank, DomainError};
use crate::domain::member::Member;
use crate::ports::MemberRepository;

#[derive(Debug, Clone)]
pub struct CheckMemberQuery {
    pub id_school_number: Option<String>,
}

pub struct CheckMemberHandler {
    members: Arc<dyn MemberRepository>,
}

impl CheckMemberHandler {
    pub fn new(members: Arc<dyn MemberRepository>) -> Self {
        Self { members }
    }

    /// `None` means no member holds the school ID.
    pub async fn handle(&self, query: CheckMemberQuery) -> Result<Option<Member>, DomainError> {
        let id = non_blank(query.id_school_number).ok_or_else(|| {
            DomainError::validation(
                "ID number is required",
                vec!["ID number is required".to_string()],
            )
        })?;

        self.members.find_by_school_id(&id).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::memory::InMemoryMemberRepository;
    use crate::domain::foundation::ErrorCode;

    #[tokio::test]
    async fn unknown_id_reports_absent() {
        let handler = CheckMemberHandler::new(Arc::new(InMemoryMemberRepository::new()));

        let found = handler
            .handle(CheckMemberQuery {
                id_school_number: Some("2022-0001".into()),
            })
            .await
            .unwrap();

        assert!(found.is_none());
    }

    #[tokio::test]
    async fn missing_id_is_rejected() {
        let handler = CheckMemberHandler::new(Arc::new(InMemoryMemberRepository::new()));

        let err = handler
            .handle(CheckMemberQuery {
                id_school_number: None,
            })
            .await
            .unwrap_err();

        assert_eq!(err.code, ErrorCode::ValidationFailed);
    }
}
