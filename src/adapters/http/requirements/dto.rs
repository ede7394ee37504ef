//! Request and response bodies for `/api/requirements`.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::adapters::http::extract::lenient;
use crate::domain::foundation::{MemberId, PageInfo, RequirementId, Timestamp};
use crate::domain::requirement::{
    ComplianceRecord, ComplianceStatus, ComplianceTally, Requirement, RequirementDraft,
    RequirementStatus, RequirementWithStats,
};

// ════════════════════════════════════════════════════════════════════════════════
// Request DTOs
// ════════════════════════════════════════════════════════════════════════════════

/// Body for both create and partial update.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RequirementRequest {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default, rename = "requirementDate", alias = "requirement_date")]
    pub requirement_date: Option<String>,
}

impl From<RequirementRequest> for RequirementDraft {
    fn from(req: RequirementRequest) -> Self {
        RequirementDraft {
            name: req.name,
            description: req.description,
            status: req.status,
            requirement_date: req.requirement_date,
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ListRequirementsParams {
    pub page: Option<String>,
    pub limit: Option<String>,
    pub status: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ComplianceRequest {
    #[serde(default, deserialize_with = "lenient::opt_i64")]
    pub member_id: Option<i64>,
    #[serde(default)]
    pub status: Option<String>,
}

// ════════════════════════════════════════════════════════════════════════════════
// Response DTOs
// ════════════════════════════════════════════════════════════════════════════════

#[derive(Debug, Clone, Serialize)]
pub struct RequirementView {
    pub id: RequirementId,
    pub name: String,
    pub description: Option<String>,
    pub status: RequirementStatus,
    pub requirement_date: NaiveDate,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl From<Requirement> for RequirementView {
    fn from(r: Requirement) -> Self {
        Self {
            id: r.id,
            name: r.name,
            description: r.description,
            status: r.status,
            requirement_date: r.requirement_date,
            created_at: r.created_at,
            updated_at: r.updated_at,
        }
    }
}

/// A listed requirement with its tally alongside the row fields.
#[derive(Debug, Clone, Serialize)]
pub struct RequirementWithStatsView {
    #[serde(flatten)]
    pub requirement: RequirementView,
    #[serde(rename = "complianceStats")]
    pub compliance_stats: ComplianceTally,
}

impl From<RequirementWithStats> for RequirementWithStatsView {
    fn from(r: RequirementWithStats) -> Self {
        Self {
            requirement: r.requirement.into(),
            compliance_stats: r.stats,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct RequirementListResponse {
    pub success: bool,
    pub requirements: Vec<RequirementWithStatsView>,
    pub pagination: PageInfo,
}

#[derive(Debug, Clone, Serialize)]
pub struct RequirementResponse {
    pub success: bool,
    pub message: String,
    pub requirement: RequirementView,
}

#[derive(Debug, Clone, Serialize)]
pub struct ArchiveResponse {
    pub success: bool,
    pub message: String,
    pub id: RequirementId,
}

#[derive(Debug, Clone, Serialize)]
pub struct ComplianceView {
    pub id: i64,
    pub requirement_id: RequirementId,
    pub member_id: MemberId,
    pub status: ComplianceStatus,
    pub submitted_at: Timestamp,
    pub updated_at: Timestamp,
}

impl From<ComplianceRecord> for ComplianceView {
    fn from(c: ComplianceRecord) -> Self {
        Self {
            id: c.id,
            requirement_id: c.requirement_id,
            member_id: c.member_id,
            status: c.status,
            submitted_at: c.submitted_at,
            updated_at: c.updated_at,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ComplianceResponse {
    pub success: bool,
    pub message: String,
    pub compliance: ComplianceView,
}
