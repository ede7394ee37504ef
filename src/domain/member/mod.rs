//! Member registry domain.

mod record;

pub use record::{Member, MemberDraft, MemberSummary, NewMember, Program, YEAR_LEVELS};
