//! In-memory requirements and compliance records.

use std::collections::BTreeMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::domain::foundation::{DomainError, MemberId, PageRequest, RequirementId, Timestamp};
use crate::domain::requirement::{
    ComplianceRecord, ComplianceStatus, NewRequirement, Requirement, RequirementChanges,
    RequirementStatus, StatusCount,
};
use crate::ports::RequirementRepository;

#[derive(Debug, Default)]
struct State {
    requirements: Vec<Requirement>,
    compliance: Vec<ComplianceRecord>,
}

#[derive(Debug, Clone, Default)]
pub struct InMemoryRequirementRepository {
    state: Arc<RwLock<State>>,
    fail_counts: Arc<AtomicBool>,
}

impl InMemoryRequirementRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Makes `compliance_counts` fail with a database error.
    pub fn fail_counts(&self, fail: bool) {
        self.fail_counts.store(fail, Ordering::SeqCst);
    }

    fn matching<'a>(
        requirements: &'a [Requirement],
        status: Option<RequirementStatus>,
    ) -> impl Iterator<Item = &'a Requirement> {
        requirements
            .iter()
            .filter(move |r| status.map_or(true, |s| r.status == s))
    }
}

#[async_trait]
impl RequirementRepository for InMemoryRequirementRepository {
    async fn create(&self, new: &NewRequirement) -> Result<Requirement, DomainError> {
        let mut state = self.state.write().await;
        let now = Timestamp::now();
        let requirement = Requirement {
            id: RequirementId::from_db(state.requirements.len() as i64 + 1),
            name: new.name.clone(),
            description: new.description.clone(),
            status: new.status,
            requirement_date: new.requirement_date,
            created_at: now,
            updated_at: now,
        };
        state.requirements.push(requirement.clone());
        Ok(requirement)
    }

    async fn find_by_id(&self, id: RequirementId) -> Result<Option<Requirement>, DomainError> {
        Ok(self
            .state
            .read()
            .await
            .requirements
            .iter()
            .find(|r| r.id == id)
            .cloned())
    }

    async fn update(
        &self,
        id: RequirementId,
        changes: &RequirementChanges,
    ) -> Result<Option<Requirement>, DomainError> {
        let mut state = self.state.write().await;
        Ok(state
            .requirements
            .iter_mut()
            .find(|r| r.id == id)
            .map(|requirement| {
                changes.apply_to(requirement, Timestamp::now());
                requirement.clone()
            }))
    }

    async fn archive(&self, id: RequirementId) -> Result<bool, DomainError> {
        let mut state = self.state.write().await;
        match state.requirements.iter_mut().find(|r| r.id == id) {
            Some(requirement) => {
                requirement.status = RequirementStatus::Archived;
                requirement.updated_at = Timestamp::now();
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn count(&self, status: Option<RequirementStatus>) -> Result<i64, DomainError> {
        let state = self.state.read().await;
        Ok(Self::matching(&state.requirements, status).count() as i64)
    }

    async fn list(
        &self,
        status: Option<RequirementStatus>,
        page: PageRequest,
    ) -> Result<Vec<Requirement>, DomainError> {
        let state = self.state.read().await;
        let mut rows: Vec<Requirement> = Self::matching(&state.requirements, status)
            .cloned()
            .collect();
        rows.sort_by_key(|r| (r.requirement_date, r.id));
        Ok(rows
            .into_iter()
            .skip(page.offset() as usize)
            .take(page.limit() as usize)
            .collect())
    }

    async fn compliance_counts(
        &self,
        ids: &[RequirementId],
    ) -> Result<Vec<StatusCount>, DomainError> {
        if self.fail_counts.load(Ordering::SeqCst) {
            return Err(DomainError::database(
                "Failed to count compliance records: simulated failure",
            ));
        }

        let state = self.state.read().await;
        let mut groups: BTreeMap<(RequirementId, &'static str), i64> = BTreeMap::new();
        for record in state
            .compliance
            .iter()
            .filter(|c| ids.contains(&c.requirement_id))
        {
            *groups
                .entry((record.requirement_id, record.status.as_str()))
                .or_default() += 1;
        }

        Ok(groups
            .into_iter()
            .map(|((requirement_id, status), count)| StatusCount {
                requirement_id,
                status: status.to_string(),
                count,
            })
            .collect())
    }

    async fn record_compliance(
        &self,
        requirement_id: RequirementId,
        member_id: MemberId,
        status: ComplianceStatus,
    ) -> Result<ComplianceRecord, DomainError> {
        let mut state = self.state.write().await;
        if !state.requirements.iter().any(|r| r.id == requirement_id) {
            return Err(DomainError::not_found("Requirement not found"));
        }

        let now = Timestamp::now();
        if let Some(record) = state
            .compliance
            .iter_mut()
            .find(|c| c.requirement_id == requirement_id && c.member_id == member_id)
        {
            record.status = status;
            record.submitted_at = now;
            record.updated_at = now;
            return Ok(record.clone());
        }

        let record = ComplianceRecord {
            id: state.compliance.len() as i64 + 1,
            requirement_id,
            member_id,
            status,
            submitted_at: now,
            updated_at: now,
        };
        state.compliance.push(record.clone());
        Ok(record)
    }
}
