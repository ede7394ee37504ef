//! ListRequirementsHandler - One page of requirements with compliance tallies.
//!
//! Issues exactly three queries: count, page, grouped compliance counts. Any
//! failure aborts the whole listing.

use std::sync::Arc;

use crate::domain::foundation::{DomainError, Page, PageRequest, RequirementId};
use crate::domain::requirement::{attach_tallies, RequirementStatus, RequirementWithStats};
use crate::ports::RequirementRepository;

#[derive(Debug, Clone, Copy)]
pub struct ListRequirementsQuery {
    pub page: PageRequest,
    pub status: Option<RequirementStatus>,
}

pub struct ListRequirementsHandler {
    requirements: Arc<dyn RequirementRepository>,
}

impl ListRequirementsHandler {
    pub fn new(requirements: Arc<dyn RequirementRepository>) -> Self {
        Self { requirements }
    }

    pub async fn handle(
        &self,
        query: ListRequirementsQuery,
    ) -> Result<Page<RequirementWithStats>, DomainError> {
        let total = self.requirements.count(query.status).await?;
        let rows = self.requirements.list(query.status, query.page).await?;

        let counts = if rows.is_empty() {
            Vec::new()
        } else {
            let ids: Vec<RequirementId> = rows.iter().map(|r| r.id).collect();
            self.requirements.compliance_counts(&ids).await?
        };

        Ok(Page::new(attach_tallies(rows, &counts), query.page, total))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::memory::InMemoryRequirementRepository;
    use crate::domain::foundation::{ErrorCode, MemberId};
    use crate::domain::requirement::{ComplianceStatus, NewRequirement};
    use chrono::NaiveDate;

    async fn seed(repo: &InMemoryRequirementRepository, dates: &[(u32, RequirementStatus)]) {
        for (day, status) in dates {
            repo.create(&NewRequirement {
                name: format!("Requirement due {}", day),
                description: None,
                status: *status,
                requirement_date: NaiveDate::from_ymd_opt(2024, 10, *day).unwrap(),
            })
            .await
            .unwrap();
        }
    }

    fn query(page: i64, limit: i64, status: Option<RequirementStatus>) -> ListRequirementsQuery {
        ListRequirementsQuery {
            page: PageRequest::new(page, limit),
            status,
        }
    }

    fn member(id: i64) -> MemberId {
        MemberId::new(id).unwrap()
    }

    #[tokio::test]
    async fn tallies_fold_grouped_counts() {
        let repo = InMemoryRequirementRepository::new();
        seed(&repo, &[(5, RequirementStatus::Open), (1, RequirementStatus::Open)]).await;
        let due_fifth = RequirementId::new(1).unwrap();
        repo.record_compliance(due_fifth, member(1), ComplianceStatus::Complied).await.unwrap();
        repo.record_compliance(due_fifth, member(2), ComplianceStatus::Complied).await.unwrap();
        repo.record_compliance(due_fifth, member(3), ComplianceStatus::NotComplied).await.unwrap();

        let page = ListRequirementsHandler::new(Arc::new(repo))
            .handle(query(1, 20, None))
            .await
            .unwrap();

        assert_eq!(page.info.total, 2);
        // Ordered by date, so the requirement due on the 1st comes first.
        assert_eq!(page.items[0].stats.total, 0);
        let stats = &page.items[1].stats;
        assert_eq!((stats.complied, stats.not_complied, stats.pending), (2, 1, 0));
        assert_eq!(stats.total, 3);
    }

    #[tokio::test]
    async fn status_filter_applies_to_count_and_rows() {
        let repo = InMemoryRequirementRepository::new();
        seed(
            &repo,
            &[
                (1, RequirementStatus::Open),
                (2, RequirementStatus::Closed),
                (3, RequirementStatus::Open),
            ],
        )
        .await;

        let page = ListRequirementsHandler::new(Arc::new(repo))
            .handle(query(1, 20, Some(RequirementStatus::Closed)))
            .await
            .unwrap();

        assert_eq!(page.info.total, 1);
        assert_eq!(page.items.len(), 1);
        assert_eq!(page.items[0].requirement.status, RequirementStatus::Closed);
    }

    #[tokio::test]
    async fn page_past_the_end_is_empty() {
        let repo = InMemoryRequirementRepository::new();
        seed(&repo, &[(1, RequirementStatus::Open)]).await;

        let page = ListRequirementsHandler::new(Arc::new(repo))
            .handle(query(3, 20, None))
            .await
            .unwrap();

        assert!(page.items.is_empty());
        assert!(!page.info.has_next);
        assert!(page.info.has_prev);
    }

    #[tokio::test]
    async fn tally_failure_aborts_listing() {
        let repo = InMemoryRequirementRepository::new();
        seed(&repo, &[(1, RequirementStatus::Open)]).await;
        repo.fail_counts(true);

        let err = ListRequirementsHandler::new(Arc::new(repo))
            .handle(query(1, 20, None))
            .await
            .unwrap_err();

        assert_eq!(err.code, ErrorCode::DatabaseError);
    }
}
