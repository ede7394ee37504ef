//! RecordComplianceHandler - Sets a member's compliance with a requirement.

use std::sync::Arc;

use crate::domain::foundation::{non_blank, DomainError, MemberId, RequirementId};
use crate::domain::requirement::{ComplianceRecord, ComplianceStatus};
use crate::ports::{MemberRepository, RequirementRepository};

#[derive(Debug, Clone)]
pub struct RecordComplianceCommand {
    pub requirement_id: RequirementId,
    pub member_id: Option<i64>,
    pub status: Option<String>,
}

pub struct RecordComplianceHandler {
    requirements: Arc<dyn RequirementRepository>,
    members: Arc<dyn MemberRepository>,
}

impl RecordComplianceHandler {
    pub fn new(
        requirements: Arc<dyn RequirementRepository>,
        members: Arc<dyn MemberRepository>,
    ) -> Self {
        Self {
            requirements,
            members,
        }
    }

    pub async fn handle(&self, cmd: RecordComplianceCommand) -> Result<ComplianceRecord, DomainError> {
        let member_id = cmd.member_id.and_then(|id| MemberId::new(id).ok());
        let status = non_blank(cmd.status);

        let (Some(member_id), Some(status)) = (member_id, status) else {
            return Err(DomainError::missing_fields(vec![
                "member_id and status are required".to_string(),
            ]));
        };
        let status: ComplianceStatus = status.parse().map_err(|_| {
            DomainError::validation(
                "Validation failed",
                vec!["Status must be one of: complied, not_complied, pending".to_string()],
            )
        })?;

        if self.requirements.find_by_id(cmd.requirement_id).await?.is_none() {
            return Err(DomainError::not_found("Requirement not found"));
        }
        if !self.members.exists(member_id).await? {
            return Err(DomainError::not_found("Member not found"));
        }

        let record = self
            .requirements
            .record_compliance(cmd.requirement_id, member_id, status)
            .await?;
        tracing::info!(
            requirement_id = %cmd.requirement_id,
            member_id = %member_id,
            status = %status,
            "Compliance recorded"
        );
        Ok(record)
    }
}
