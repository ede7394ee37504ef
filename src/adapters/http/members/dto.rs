//! Request and response bodies for `/api/members`.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::adapters::http::extract::lenient;
use crate::domain::foundation::{MemberId, PageInfo, Timestamp};
use crate::domain::member::{Member, MemberDraft, MemberSummary};

// ════════════════════════════════════════════════════════════════════════════════
// Request DTOs
// ════════════════════════════════════════════════════════════════════════════════

/// `user_id` may be sent by older clients; it is accepted and ignored.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CreateMemberRequest {
    #[serde(default)]
    pub first_name: Option<String>,
    #[serde(default)]
    pub last_name: Option<String>,
    #[serde(default)]
    pub suffix: Option<String>,
    #[serde(default, deserialize_with = "lenient::opt_string")]
    pub id_school_number: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub birth_date: Option<String>,
    #[serde(default)]
    pub enrollment_date: Option<String>,
    #[serde(default)]
    pub program: Option<String>,
    #[serde(default, deserialize_with = "lenient::opt_string")]
    pub year: Option<String>,
    #[serde(default, deserialize_with = "lenient::flag")]
    pub is_paid: bool,
}

impl From<CreateMemberRequest> for MemberDraft {
    fn from(req: CreateMemberRequest) -> Self {
        MemberDraft {
            first_name: req.first_name,
            last_name: req.last_name,
            suffix: req.suffix,
            id_school_number: req.id_school_number,
            email: req.email,
            birth_date: req.birth_date,
            enrollment_date: req.enrollment_date,
            program: req.program,
            year: req.year,
            is_paid: req.is_paid,
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct IdNumberQuery {
    #[serde(rename = "idNumber")]
    pub id_number: Option<String>,
}

// ════════════════════════════════════════════════════════════════════════════════
// Response DTOs
// ════════════════════════════════════════════════════════════════════════════════

#[derive(Debug, Clone, Serialize)]
pub struct MemberView {
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

impl From<Member> for MemberView {
    fn from(m: Member) -> Self {
        Self {
            id: m.id,
            first_name: m.first_name,
            last_name: m.last_name,
            suffix: m.suffix,
            id_school_number: m.id_school_number,
            email: m.email,
            birth_date: m.birth_date,
            enrollment_date: m.enrollment_date,
            program: m.program,
            program_name: m.program_name,
            year: m.year,
            is_paid: m.is_paid,
            created_at: m.created_at,
            updated_at: m.updated_at,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct MemberSummaryView {
    pub id: MemberId,
    pub id_school_number: String,
    pub first_name: String,
    pub last_name: String,
    pub email: Option<String>,
}

impl From<MemberSummary> for MemberSummaryView {
    fn from(s: MemberSummary) -> Self {
        Self {
            id: s.id,
            id_school_number: s.id_school_number,
            first_name: s.first_name,
            last_name: s.last_name,
            email: s.email,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct MemberResponse {
    pub success: bool,
    pub message: String,
    pub member: MemberView,
}

#[derive(Debug, Clone, Serialize)]
pub struct MemberListResponse {
    pub success: bool,
    pub members: Vec<MemberView>,
    pub pagination: PageInfo,
}

#[derive(Debug, Clone, Serialize)]
pub struct MemberCheckResponse {
    pub success: bool,
    pub exists: bool,
    pub member: Option<MemberView>,
}

#[derive(Debug, Clone, Serialize)]
pub struct MemberSummaryResponse {
    pub success: bool,
    pub count: usize,
    pub members: Vec<MemberSummaryView>,
}
