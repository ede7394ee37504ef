//! CreateMemberHandler - Validates and inserts a member record.

use std::sync::Arc;

use chrono::NaiveDate;

use crate::domain::foundation::{DomainError, Timestamp};
use crate::domain::member::{Member, MemberDraft, NewMember};
use crate::ports::MemberRepository;

pub struct CreateMemberHandler {
    members: Arc<dyn MemberRepository>,
}

impl CreateMemberHandler {
    pub fn new(members: Arc<dyn MemberRepository>) -> Self {
        Self { members }
    }

    pub async fn handle(&self, draft: MemberDraft) -> Result<Member, DomainError> {
        self.handle_on(draft, Timestamp::now().date()).await
    }

    /// Same as `handle` with an explicit "today" for the birth-date bound.
    pub async fn handle_on(&self, draft: MemberDraft, today: NaiveDate) -> Result<Member, DomainError> {
        let new = NewMember::from_draft(draft, today)?;

        if self
            .members
            .find_by_school_id(new.id_school_number.as_str())
            .await?
            .is_some()
        {
            return Err(DomainError::conflict(
                "This student ID is already registered as a member",
            ));
        }

        let member = self.members.create(&new).await?;
        tracing::info!(member_id = %member.id, program = %member.program, "Member created");
        Ok(member)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::memory::InMemoryMemberRepository;
    use crate::domain::foundation::ErrorCode;

    fn draft(school_id: &str) -> MemberDraft {
        MemberDraft {
            first_name: Some("Maria".into()),
            last_name: Some("Santos".into()),
            id_school_number: Some(school_id.into()),
            birth_date: Some("2003-05-17".into()),
            enrollment_date: Some("2021-08-09".into()),
            program: Some("BSCS".into()),
            year: Some("3".into()),
            email: Some("maria@example.edu".into()),
            ..Default::default()
        }
    }

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 6, 1).unwrap()
    }

    #[tokio::test]
    async fn creates_member_with_program_name() {
        let repo = InMemoryMemberRepository::new();
        let handler = CreateMemberHandler::new(Arc::new(repo.clone()));

        let member = handler.handle_on(draft("2021-0001"), today()).await.unwrap();

        assert_eq!(member.program, "BSCS");
        assert_eq!(member.program_name.as_deref(), Some("Bachelor of Science in Computer Science"));
        assert!(!member.is_paid);
        assert_eq!(repo.member_count().await, 1);
    }

    #[tokio::test]
    async fn duplicate_school_id_is_conflict_and_inserts_nothing() {
        let repo = InMemoryMemberRepository::new();
        let handler = CreateMemberHandler::new(Arc::new(repo.clone()));
        handler.handle_on(draft("2021-0001"), today()).await.unwrap();

        let err = handler.handle_on(draft("2021-0001"), today()).await.unwrap_err();

        assert_eq!(err.code, ErrorCode::Conflict);
        assert_eq!(repo.member_count().await, 1);
    }

    #[tokio::test]
    async fn missing_fields_are_listed() {
        let handler = CreateMemberHandler::new(Arc::new(InMemoryMemberRepository::new()));

        let err = handler
            .handle_on(MemberDraft::default(), today())
            .await
            .unwrap_err();

        assert_eq!(err.code, ErrorCode::MissingFields);
        assert_eq!(err.message, "Missing required fields");
        assert_eq!(err.errors.len(), 7);
    }

    #[tokio::test]
    async fn future_birth_date_is_rejected() {
        let handler = CreateMemberHandler::new(Arc::new(InMemoryMemberRepository::new()));
        let mut input = draft("2021-0002");
        input.birth_date = Some("2030-01-01".into());

        let err = handler.handle_on(input, today()).await.unwrap_err();

        assert_eq!(err.code, ErrorCode::ValidationFailed);
        assert!(err.errors.contains(&"Birth date cannot be in the future".to_string()));
    }
}
