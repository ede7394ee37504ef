//! Member records.
//!
//! Members are keyed by their school ID number and exist independently of
//! user accounts. A `user_id` sent alongside a new member is never stored.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::domain::foundation::{
    check_date, is_valid_email, non_blank, DateCheck, DomainError, MemberId, SchoolIdNumber,
    Timestamp, ValidationError,
};

/// Lowest and highest accepted year level.
pub const YEAR_LEVELS: std::ops::RangeInclusive<i16> = 1..=4;

/// Degree programs a member can be enrolled in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Program {
    #[serde(rename = "BSIT")]
    Bsit,
    #[serde(rename = "BSCS")]
    Bscs,
    #[serde(rename = "BSIS")]
    Bsis,
}

impl Program {
    pub const ALL: [Program; 3] = [Program::Bsit, Program::Bscs, Program::Bsis];

    pub fn code(&self) -> &'static str {
        match self {
            Program::Bsit => "BSIT",
            Program::Bscs => "BSCS",
            Program::Bsis => "BSIS",
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Program::Bsit => "Bachelor of Science in Information Technology",
            Program::Bscs => "Bachelor of Science in Computer Science",
            Program::Bsis => "Bachelor of Science in Information Systems",
        }
    }
}

impl fmt::Display for Program {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for Program {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Program::ALL
            .into_iter()
            .find(|p| p.code() == s)
            .ok_or_else(|| ValidationError::invalid_format("program", "unknown program code"))
    }
}

/// A persisted member, joined with its program's display name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Member {
    pub id: MemberId,
    pub first_name: String,
    pub last_name: String,
    pub suffix: Option<String>,
    pub id_school_number: String,
    pub email: Option<String>,
    pub birth_date: NaiveDate,
    pub enrollment_date: NaiveDate,
    pub program: String,
    pub program_name: Option<String>,
    pub year: i16,
    pub is_paid: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Short member listing row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MemberSummary {
    pub id: MemberId,
    pub id_school_number: String,
    pub first_name: String,
    pub last_name: String,
    pub email: Option<String>,
}

impl From<&Member> for MemberSummary {
    fn from(member: &Member) -> Self {
        Self {
            id: member.id,
            id_school_number: member.id_school_number.clone(),
            first_name: member.first_name.clone(),
            last_name: member.last_name.clone(),
            email: member.email.clone(),
        }
    }
}

/// Raw member input as received from a client.
#[derive(Debug, Clone, Default)]
pub struct MemberDraft {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub suffix: Option<String>,
    pub id_school_number: Option<String>,
    pub email: Option<String>,
    pub birth_date: Option<String>,
    pub enrollment_date: Option<String>,
    pub program: Option<String>,
    pub year: Option<String>,
    pub is_paid: bool,
}

/// A validated member ready for insertion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewMember {
    pub first_name: String,
    pub last_name: String,
    pub suffix: Option<String>,
    pub id_school_number: SchoolIdNumber,
    pub email: Option<String>,
    pub birth_date: NaiveDate,
    pub enrollment_date: NaiveDate,
    pub program: Program,
    pub year: i16,
    pub is_paid: bool,
}

impl NewMember {
    /// Validates a draft in two passes: required fields first, then formats.
    ///
    /// Each pass reports every problem it finds. `today` bounds the birth date.
    pub fn from_draft(draft: MemberDraft, today: NaiveDate) -> Result<Self, DomainError> {
        let first_name = non_blank(draft.first_name);
        let last_name = non_blank(draft.last_name);
        let id_school_number = non_blank(draft.id_school_number);
        let birth_date = non_blank(draft.birth_date);
        let enrollment_date = non_blank(draft.enrollment_date);
        let program = non_blank(draft.program);
        let year = non_blank(draft.year);

        let mut missing = Vec::new();
        if first_name.is_none() {
            missing.push("First name is required");
        }
        if last_name.is_none() {
            missing.push("Last name is required");
        }
        if id_school_number.is_none() {
            missing.push("School ID number is required");
        }
        if birth_date.is_none() {
            missing.push("Birth date is required");
        }
        if enrollment_date.is_none() {
            missing.push("Enrollment date is required");
        }
        if program.is_none() {
            missing.push("Program is required");
        }
        if year.is_none() {
            missing.push("Year level is required");
        }

        let (
            Some(first_name),
            Some(last_name),
            Some(id_school_number),
            Some(birth_date),
            Some(enrollment_date),
            Some(program),
            Some(year),
        ) = (
            first_name,
            last_name,
            id_school_number,
            birth_date,
            enrollment_date,
            program,
            year,
        )
        else {
            return Err(DomainError::missing_fields(
                missing.into_iter().map(String::from).collect(),
            ));
        };

        let mut errors: Vec<String> = Vec::new();

        let birth = match check_date(&birth_date) {
            DateCheck::Valid(date) if date > today => {
                errors.push("Birth date cannot be in the future".into());
                None
            }
            DateCheck::Valid(date) => Some(date),
            DateCheck::BadFormat => {
                errors.push("Birth date must be in YYYY-MM-DD format".into());
                None
            }
            DateCheck::NotACalendarDate => {
                errors.push("Birth date is not a valid date".into());
                None
            }
        };

        let enrollment = match check_date(&enrollment_date) {
            DateCheck::Valid(date) => Some(date),
            DateCheck::BadFormat => {
                errors.push("Enrollment date must be in YYYY-MM-DD format".into());
                None
            }
            DateCheck::NotACalendarDate => {
                errors.push("Enrollment date is not a valid date".into());
                None
            }
        };

        let program = match program.parse::<Program>() {
            Ok(p) => Some(p),
            Err(_) => {
                let codes: Vec<&str> = Program::ALL.iter().map(|p| p.code()).collect();
                errors.push(format!("Program must be one of: {}", codes.join(", ")));
                None
            }
        };

        let year = match year.parse::<i16>() {
            Ok(y) if YEAR_LEVELS.contains(&y) => Some(y),
            _ => {
                errors.push("Year level must be between 1 and 4".into());
                None
            }
        };

        let email = non_blank(draft.email);
        if let Some(ref e) = email {
            if !is_valid_email(e) {
                errors.push("Email format is invalid".into());
            }
        }

        let school_id = match SchoolIdNumber::new(id_school_number) {
            Ok(id) => Some(id),
            Err(e) => {
                errors.push(e.to_string());
                None
            }
        };

        match (birth, enrollment, program, year, school_id) {
            (Some(birth_date), Some(enrollment_date), Some(program), Some(year), Some(id))
                if errors.is_empty() =>
            {
                Ok(Self {
                    first_name,
                    last_name,
                    suffix: non_blank(draft.suffix),
                    id_school_number: id,
                    email,
                    birth_date,
                    enrollment_date,
                    program,
                    year,
                    is_paid: draft.is_paid,
                })
            }
            _ => Err(DomainError::validation("Validation failed", errors)),
        }
    }
}
