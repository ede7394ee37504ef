//! CreateRequirementHandler - Adds a requirement members must comply with.

use std::sync::Arc;

use crate::domain::foundation::DomainError;
use crate::domain::requirement::{Requirement, RequirementDraft};
use crate::ports::RequirementRepository;

pub struct CreateRequirementHandler {
    requirements: Arc<dyn RequirementRepository>,
}

impl CreateRequirementHandler {
    pub fn new(requirements: Arc<dyn RequirementRepository>) -> Self {
        Self { requirements }
    }

    pub async fn handle(&self, draft: RequirementDraft) -> Result<Requirement, DomainError> {
        let new = draft.into_new()?;
        let requirement = self.requirements.create(&new).await?;
        tracing::info!(requirement_id = %requirement.id, "Requirement created");
        Ok(requirement)
    }
}
