//! In-memory member records.

use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::domain::foundation::{DomainError, MemberId, Page, PageRequest, Timestamp};
use crate::domain::member::{Member, MemberSummary, NewMember};
use crate::ports::MemberRepository;

#[derive(Debug, Clone, Default)]
pub struct InMemoryMemberRepository {
    members: Arc<RwLock<Vec<Member>>>,
}

impl InMemoryMemberRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn member_count(&self) -> usize {
        self.members.read().await.len()
    }
}

#[async_trait]
impl MemberRepository for InMemoryMemberRepository {
    async fn create(&self, new: &NewMember) -> Result<Member, DomainError> {
        let mut members = self.members.write().await;
        if members
            .iter()
            .any(|m| m.id_school_number == new.id_school_number.as_str())
        {
            return Err(DomainError::conflict(
                "This student ID is already registered as a member",
            ));
        }

        let now = Timestamp::now();
        let member = Member {
            id: MemberId::from_db(members.len() as i64 + 1),
            first_name: new.first_name.clone(),
            last_name: new.last_name.clone(),
            suffix: new.suffix.clone(),
            id_school_number: new.id_school_number.as_str().to_string(),
            email: new.email.clone(),
            birth_date: new.birth_date,
            enrollment_date: new.enrollment_date,
            program: new.program.code().to_string(),
            program_name: Some(new.program.name().to_string()),
            year: new.year,
            is_paid: new.is_paid,
            created_at: now,
            updated_at: now,
        };
        members.push(member.clone());
        Ok(member)
    }

    async fn exists(&self, id: MemberId) -> Result<bool, DomainError> {
        Ok(self.members.read().await.iter().any(|m| m.id == id))
    }

    async fn find_by_school_id(
        &self,
        id_school_number: &str,
    ) -> Result<Option<Member>, DomainError> {
        Ok(self
            .members
            .read()
            .await
            .iter()
            .find(|m| m.id_school_number == id_school_number)
            .cloned())
    }

    async fn find_by_id_or_school_id(&self, key: &str) -> Result<Option<Member>, DomainError> {
        let members = self.members.read().await;
        let by_id = key
            .parse::<MemberId>()
            .ok()
            .and_then(|id| members.iter().find(|m| m.id == id));
        Ok(by_id
            .or_else(|| members.iter().find(|m| m.id_school_number == key))
            .cloned())
    }

    async fn list(&self, page: PageRequest) -> Result<Page<Member>, DomainError> {
        let members = self.members.read().await;
        let total = members.len() as i64;
        let items = members
            .iter()
            .rev()
            .skip(page.offset() as usize)
            .take(page.limit() as usize)
            .cloned()
            .collect();
        Ok(Page::new(items, page, total))
    }

    async fn list_summaries(&self) -> Result<Vec<MemberSummary>, DomainError> {
        Ok(self
            .members
            .read()
            .await
            .iter()
            .rev()
            .map(MemberSummary::from)
            .collect())
    }
}
