//! Compliance requirements members are expected to fulfil.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::domain::foundation::{
    check_date, DateCheck, DomainError, RequirementId, Timestamp, ValidationError,
};

pub const NAME_MIN_CHARS: usize = 3;
pub const NAME_MAX_CHARS: usize = 255;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RequirementStatus {
    #[default]
    Open,
    Closed,
    /// Soft-deleted.
    Archived,
}

impl RequirementStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            RequirementStatus::Open => "open",
            RequirementStatus::Closed => "closed",
            RequirementStatus::Archived => "archived",
        }
    }

    /// Interprets a listing filter. Unknown values mean "no filter".
    pub fn filter_from_query(raw: Option<&str>) -> Option<Self> {
        raw.and_then(|s| s.trim().parse().ok())
    }
}

impl fmt::Display for RequirementStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RequirementStatus {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "open" => Ok(RequirementStatus::Open),
            "closed" => Ok(RequirementStatus::Closed),
            "archived" => Ok(RequirementStatus::Archived),
            _ => Err(ValidationError::invalid_format(
                "status",
                "must be one of: open, closed, archived",
            )),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Requirement {
    pub id: RequirementId,
    pub name: String,
    pub description: Option<String>,
    pub status: RequirementStatus,
    pub requirement_date: NaiveDate,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Raw requirement input. Used for both creation and partial updates.
#[derive(Debug, Clone, Default)]
pub struct RequirementDraft {
    pub name: Option<String>,
    pub description: Option<String>,
    pub status: Option<String>,
    pub requirement_date: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewRequirement {
    pub name: String,
    pub description: Option<String>,
    pub status: RequirementStatus,
    pub requirement_date: NaiveDate,
}

/// Fields to overwrite on an existing requirement. `None` leaves a field as is.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RequirementChanges {
    pub name: Option<String>,
    pub description: Option<String>,
    pub status: Option<RequirementStatus>,
    pub requirement_date: Option<NaiveDate>,
}

impl RequirementChanges {
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.description.is_none()
            && self.status.is_none()
            && self.requirement_date.is_none()
    }

    /// Applies the changes to a requirement, stamping `updated_at`.
    pub fn apply_to(&self, requirement: &mut Requirement, now: Timestamp) {
        if let Some(ref name) = self.name {
            requirement.name = name.clone();
        }
        if let Some(ref description) = self.description {
            requirement.description = Some(description.clone());
        }
        if let Some(status) = self.status {
            requirement.status = status;
        }
        if let Some(date) = self.requirement_date {
            requirement.requirement_date = date;
        }
        requirement.updated_at = now;
    }
}

fn check_name(name: &str, errors: &mut Vec<String>) {
    let len = name.chars().count();
    if !(NAME_MIN_CHARS..=NAME_MAX_CHARS).contains(&len) {
        errors.push(format!(
            "Name must be between {} and {} characters",
            NAME_MIN_CHARS, NAME_MAX_CHARS
        ));
    }
}

fn check_requirement_date(raw: &str, errors: &mut Vec<String>) -> Option<NaiveDate> {
    match check_date(raw) {
        DateCheck::Valid(date) => Some(date),
        DateCheck::BadFormat => {
            errors.push("Requirement date must be in YYYY-MM-DD format".into());
            None
        }
        DateCheck::NotACalendarDate => {
            errors.push("Requirement date is not a valid date".into());
            None
        }
    }
}

fn check_status(raw: &str, errors: &mut Vec<String>) -> Option<RequirementStatus> {
    match raw.parse() {
        Ok(status) => Some(status),
        Err(_) => {
            errors.push("Status must be one of: open, closed, archived".into());
            None
        }
    }
}

impl RequirementDraft {
    pub fn into_new(self) -> Result<NewRequirement, DomainError> {
        let mut errors = Vec::new();

        let name = self.name.map(|n| n.trim().to_string()).unwrap_or_default();
        if name.is_empty() {
            errors.push("Name is required".to_string());
        } else {
            check_name(&name, &mut errors);
        }

        let requirement_date = match self.requirement_date.as_deref().map(str::trim) {
            None | Some("") => {
                errors.push("Requirement date is required".to_string());
                None
            }
            Some(raw) => check_requirement_date(raw, &mut errors),
        };

        let status = match self.status.as_deref() {
            None => Some(RequirementStatus::default()),
            Some(raw) => check_status(raw.trim(), &mut errors),
        };

        match (requirement_date, status) {
            (Some(requirement_date), Some(status)) if errors.is_empty() => Ok(NewRequirement {
                name,
                description: self.description,
                status,
                requirement_date,
            }),
            _ => Err(DomainError::validation("Validation failed", errors)),
        }
    }

    pub fn into_changes(self) -> Result<RequirementChanges, DomainError> {
        let mut errors = Vec::new();

        let name = self.name.map(|n| n.trim().to_string());
        if let Some(ref n) = name {
            check_name(n, &mut errors);
        }

        let requirement_date = self
            .requirement_date
            .as_deref()
            .and_then(|raw| check_requirement_date(raw.trim(), &mut errors));

        let status = self
            .status
            .as_deref()
            .and_then(|raw| check_status(raw.trim(), &mut errors));

        if !errors.is_empty() {
            return Err(DomainError::validation("Validation failed", errors));
        }

        Ok(RequirementChanges {
            name,
            description: self.description,
            status,
            requirement_date,
        })
    }
}
