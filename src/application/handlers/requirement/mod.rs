//! Requirement registry handlers.

mod create_requirement;
mod list_requirements;
mod record_compliance;
mod update_requirement;

pub use create_requirement::CreateRequirementHandler;
pub use list_requirements::{ListRequirementsHandler, ListRequirementsQuery};
pub use record_compliance::{RecordComplianceCommand, RecordComplianceHandler};
pub use update_requirement::{
    ArchiveRequirementHandler, UpdateRequirementCommand, UpdateRequirementHandler,
};
