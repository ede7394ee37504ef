//! RequirementRepository port for requirements and compliance records.

use async_trait::async_trait;

use crate::domain::foundation::{DomainError, MemberId, PageRequest, RequirementId};
use crate::domain::requirement::{
    ComplianceRecord, ComplianceStatus, NewRequirement, Requirement, RequirementChanges,
    RequirementStatus, StatusCount,
};

#[async_trait]
pub trait RequirementRepository: Send + Sync {
    async fn create(&self, requirement: &NewRequirement) -> Result<Requirement, DomainError>;

    async fn find_by_id(&self, id: RequirementId) -> Result<Option<Requirement>, DomainError>;

    /// Apply changes and refresh `updated_at`. `Ok(None)` when absent.
    async fn update(
        &self,
        id: RequirementId,
        changes: &RequirementChanges,
    ) -> Result<Option<Requirement>, DomainError>;

    /// Set status to `archived`. Returns `false` when absent.
    async fn archive(&self, id: RequirementId) -> Result<bool, DomainError>;

    async fn count(&self, status: Option<RequirementStatus>) -> Result<i64, DomainError>;

    /// One page ordered by `requirement_date`, then `id`.
    async fn list(
        &self,
        status: Option<RequirementStatus>,
        page: PageRequest,
    ) -> Result<Vec<Requirement>, DomainError>;

    /// Grouped compliance counts for the given requirements, in one query.
    async fn compliance_counts(
        &self,
        ids: &[RequirementId],
    ) -> Result<Vec<StatusCount>, DomainError>;

    /// Insert or overwrite a member's compliance record.
    async fn record_compliance(
        &self,
        requirement_id: RequirementId,
        member_id: MemberId,
        status: ComplianceStatus,
    ) -> Result<ComplianceRecord, DomainError>;
}
