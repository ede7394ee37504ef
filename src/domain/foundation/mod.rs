//! Foundation module - Shared domain primitives.
//!
//! Contains identifiers, timestamps, pagination, authentication types and
//! the error vocabulary used across the orgdesk domain.

mod auth;
mod errors;
mod formats;
mod ids;
mod pagination;
mod timestamp;

pub use auth::{AuthError, AuthenticatedUser, NewRemoteIdentity, RemoteIdentity};
pub use errors::{DomainError, ErrorCode, ValidationError};
pub use formats::{check_date, is_valid_email, non_blank, parse_date, parse_time, DateCheck};
pub use ids::{EventId, FirebaseUid, MemberId, RegistrationId, RequirementId, SchoolIdNumber, UserId};
pub use pagination::{Page, PageInfo, PageRequest, DEFAULT_PAGE_SIZE, MAX_PAGE_SIZE};
pub use timestamp::Timestamp;
