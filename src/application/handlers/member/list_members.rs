//! Member listings: paginated records and the full summary list.

use std::sync::Arc;

use crate::domain::foundation::{DomainError, Page, PageRequest};
use crate::domain::member::{Member, MemberSummary};
use crate::ports::MemberRepository;

pub struct ListMembersHandler {
    members: Arc<dyn MemberRepository>,
}

impl ListMembersHandler {
    pub fn new(members: Arc<dyn MemberRepository>) -> Self {
        Self { members }
    }

    pub async fn handle(&self, page: PageRequest) -> Result<Page<Member>, DomainError> {
        self.members.list(page).await
    }
}

pub struct ListMemberSummariesHandler {
    members: Arc<dyn MemberRepository>,
}

impl ListMemberSummariesHandler {
    pub fn new(members: Arc<dyn MemberRepository>) -> Self {
        Self { members }
    }

    pub async fn handle(&self) -> Result<Vec<MemberSummary>, DomainError> {
        self.members.list_summaries().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::memory::InMemoryMemberRepository;
    use crate::application::handlers::member::CreateMemberHandler;
    use crate::domain::member::MemberDraft;

    async fn seed(repo: &InMemoryMemberRepository, count: usize) {
        let create = CreateMemberHandler::new(Arc::new(repo.clone()));
        for i in 1..=count {
            create
                .handle(MemberDraft {
                    first_name: Some(format!("Member{}", i)),
                    last_name: Some("Test".into()),
                    id_school_number: Some(format!("2023-{:04}", i)),
                    birth_date: Some("2004-01-01".into()),
                    enrollment_date: Some("2023-08-01".into()),
                    program: Some("BSIS".into()),
                    year: Some("1".into()),
                    ..Default::default()
                })
                .await
                .unwrap();
        }
    }

    #[tokio::test]
    async fn page_beyond_last_is_empty() {
        let repo = InMemoryMemberRepository::new();
        seed(&repo, 3).await;
        let handler = ListMembersHandler::new(Arc::new(repo));

        let page = handler.handle(PageRequest::new(5, 2)).await.unwrap();

        assert!(page.items.is_empty());
        assert_eq!(page.info.total, 3);
        assert!(!page.info.has_next);
    }

    #[tokio::test]
    async fn summaries_are_newest_first() {
        let repo = InMemoryMemberRepository::new();
        seed(&repo, 3).await;
        let handler = ListMemberSummariesHandler::new(Arc::new(repo));

        let summaries = handler.handle().await.unwrap();

        let ids: Vec<&str> = summaries.iter().map(|s| s.id_school_number.as_str()).collect();
        assert_eq!(ids, vec!["2023-0003", "2023-0002", "2023-0001"]);
    }
}
