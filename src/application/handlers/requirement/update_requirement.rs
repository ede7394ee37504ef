//! Requirement mutations: partial update and archive.

use std::sync::Arc;

use crate::domain::foundation::{DomainError, RequirementId};
use crate::domain::requirement::{Requirement, RequirementDraft};
use crate::ports::RequirementRepository;

#[derive(Debug, Clone)]
pub struct UpdateRequirementCommand {
    pub id: RequirementId,
    pub draft: RequirementDraft,
}

pub struct UpdateRequirementHandler {
    requirements: Arc<dyn RequirementRepository>,
}

impl UpdateRequirementHandler {
    pub fn new(requirements: Arc<dyn RequirementRepository>) -> Self {
        Self { requirements }
    }

    /// Absent fields are left alone; `updated_at` is refreshed regardless.
    pub async fn handle(&self, cmd: UpdateRequirementCommand) -> Result<Requirement, DomainError> {
        let changes = cmd.draft.into_changes()?;
        let requirement = self
            .requirements
            .update(cmd.id, &changes)
            .await?
            .ok_or_else(|| DomainError::not_found("Requirement not found"))?;

        tracing::info!(requirement_id = %cmd.id, "Requirement updated");
        Ok(requirement)
    }
}

pub struct ArchiveRequirementHandler {
    requirements: Arc<dyn RequirementRepository>,
}

impl ArchiveRequirementHandler {
    pub fn new(requirements: Arc<dyn RequirementRepository>) -> Self {
        Self { requirements }
    }

    pub async fn handle(&self, id: RequirementId) -> Result<RequirementId, DomainError> {
        if !self.requirements.archive(id).await? {
            return Err(DomainError::not_found("Requirement not found"));
        }
        tracing::info!(requirement_id = %id, "Requirement archived");
        Ok(id)
    }
}
