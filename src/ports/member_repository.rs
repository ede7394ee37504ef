//! MemberRepository port.

use async_trait::async_trait;

use crate::domain::foundation::{DomainError, MemberId, Page, PageRequest};
use crate::domain::member::{Member, MemberSummary, NewMember};

#[async_trait]
pub trait MemberRepository: Send + Sync {
    /// Insert a member. Returns `Conflict` if the school ID is taken.
    async fn create(&self, member: &NewMember) -> Result<Member, DomainError>;

    async fn exists(&self, id: MemberId) -> Result<bool, DomainError>;

    async fn find_by_school_id(&self, id_school_number: &str)
        -> Result<Option<Member>, DomainError>;

    /// Looks up by numeric id first, then by school ID number.
    async fn find_by_id_or_school_id(&self, key: &str) -> Result<Option<Member>, DomainError>;

    /// Members in insertion order, joined with program names.
    async fn list(&self, page: PageRequest) -> Result<Page<Member>, DomainError>;

    /// Every member, newest first.
    async fn list_summaries(&self) -> Result<Vec<MemberSummary>, DomainError>;
}
