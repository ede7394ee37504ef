//! Requirement registry domain: requirements and member compliance.

mod compliance;
mod item;

pub use compliance::{
    attach_tallies, ComplianceRecord, ComplianceStatus, ComplianceTally, RequirementWithStats,
    StatusCount,
};
pub use item::{
    NewRequirement, Requirement, RequirementChanges, RequirementDraft, RequirementStatus,
    NAME_MAX_CHARS, NAME_MIN_CHARS,
};
