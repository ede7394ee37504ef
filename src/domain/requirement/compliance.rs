//! Per-member compliance records and the per-requirement tally.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::domain::foundation::{MemberId, RequirementId, Timestamp, ValidationError};

use super::Requirement;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ComplianceStatus {
    Complied,
    NotComplied,
    #[default]
    Pending,
}

impl ComplianceStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ComplianceStatus::Complied => "complied",
            ComplianceStatus::NotComplied => "not_complied",
            ComplianceStatus::Pending => "pending",
        }
    }
}

impl fmt::Display for ComplianceStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ComplianceStatus {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "complied" => Ok(ComplianceStatus::Complied),
            "not_complied" => Ok(ComplianceStatus::NotComplied),
            "pending" => Ok(ComplianceStatus::Pending),
            _ => Err(ValidationError::invalid_format(
                "status",
                "must be one of: complied, not_complied, pending",
            )),
        }
    }
}

/// One member's compliance with one requirement.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ComplianceRecord {
    pub id: i64,
    pub requirement_id: RequirementId,
    pub member_id: MemberId,
    pub status: ComplianceStatus,
    pub submitted_at: Timestamp,
    pub updated_at: Timestamp,
}

/// One row of a grouped count over compliance records.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusCount {
    pub requirement_id: RequirementId,
    pub status: String,
    pub count: i64,
}

/// Compliance counts for a single requirement.
///
/// `total` is the sum of every grouped count, including statuses outside
/// the three known buckets.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ComplianceTally {
    pub complied: i64,
    pub not_complied: i64,
    pub pending: i64,
    pub total: i64,
}

impl ComplianceTally {
    pub fn add(&mut self, status: &str, count: i64) {
        match status.parse::<ComplianceStatus>() {
            Ok(ComplianceStatus::Complied) => self.complied += count,
            Ok(ComplianceStatus::NotComplied) => self.not_complied += count,
            Ok(ComplianceStatus::Pending) => self.pending += count,
            Err(_) => {}
        }
        self.total += count;
    }

    /// Folds `(status, count)` pairs into a tally. Absent buckets stay zero.
    pub fn from_counts<'a>(counts: impl IntoIterator<Item = (&'a str, i64)>) -> Self {
        counts
            .into_iter()
            .fold(Self::default(), |mut tally, (status, count)| {
                tally.add(status, count);
                tally
            })
    }
}

/// A requirement together with its compliance tally.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequirementWithStats {
    pub requirement: Requirement,
    pub stats: ComplianceTally,
}

/// Attaches tallies to requirements from a batch of grouped counts.
///
/// Requirements with no compliance rows get an all-zero tally.
pub fn attach_tallies(
    requirements: Vec<Requirement>,
    counts: &[StatusCount],
) -> Vec<RequirementWithStats> {
    requirements
        .into_iter()
        .map(|requirement| {
            let stats = ComplianceTally::from_counts(
                counts
                    .iter()
                    .filter(|c| c.requirement_id == requirement.id)
                    .map(|c| (c.status.as_str(), c.count)),
            );
            RequirementWithStats { requirement, stats }
        })
        .collect()
}
