//! GetMemberHandler - Fetches a member by numeric id or school ID number.

use std::sync::Arc;

use crate::domain::foundation::DomainError;
use crate::domain::member::Member;
use crate::ports::MemberRepository;

#[derive(Debug, Clone)]
pub struct GetMemberQuery {
    /// Either the row id or the school ID number.
    pub key: String,
}

pub struct GetMemberHandler {
    members: Arc<dyn MemberRepository>,
}

impl GetMemberHandler {
    pub fn new(members: Arc<dyn MemberRepository>) -> Self {
        Self { members }
    }

    pub async fn handle(&self, query: GetMemberQuery) -> Result<Member, DomainError> {
        self.members
            .find_by_id_or_school_id(query.key.trim())
            .await?
            .ok_or_else(|| DomainError::not_found("Member not found"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::memory::InMemoryMemberRepository;
    use crate::application::handlers::member::CreateMemberHandler;
    use crate::domain::foundation::ErrorCode;
    use crate::domain::member::MemberDraft;

    async fn seeded() -> InMemoryMemberRepository {
        let repo = InMemoryMemberRepository::new();
        CreateMemberHandler::new(Arc::new(repo.clone()))
            .handle(MemberDraft {
                first_name: Some("Jose".into()),
                last_name: Some("Rizal".into()),
                id_school_number: Some("2020-1861".into()),
                birth_date: Some("2001-06-19".into()),
                enrollment_date: Some("2020-08-01".into()),
                program: Some("BSIT".into()),
                year: Some("4".into()),
                ..Default::default()
            })
            .await
            .unwrap();
        repo
    }

    fn query(key: &str) -> GetMemberQuery {
        GetMemberQuery { key: key.into() }
    }

    #[tokio::test]
    async fn finds_by_numeric_id() {
        let handler = GetMemberHandler::new(Arc::new(seeded().await));

        let member = handler.handle(query("1")).await.unwrap();

        assert_eq!(member.id_school_number, "2020-1861");
    }

    #[tokio::test]
    async fn finds_by_school_id() {
        let handler = GetMemberHandler::new(Arc::new(seeded().await));

        let member = handler.handle(query("2020-1861")).await.unwrap();

        assert_eq!(member.last_name, "Rizal");
    }

    #[tokio::test]
    async fn absent_member_is_not_found() {
        let handler = GetMemberHandler::new(Arc::new(seeded().await));

        let err = handler.handle(query("42")).await.unwrap_err();

        assert_eq!(err.code, ErrorCode::NotFound);
        assert_eq!(err.message, "Member not found");
    }
}
