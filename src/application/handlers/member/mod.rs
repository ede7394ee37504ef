//! Member registry handlers.

mod check_member;
mod create_member;
mod get_member;
mod list_members;

pub use check_member::{CheckMemberHandler, CheckMemberQuery};
pub use create_member::CreateMemberHandler;
pub use get_member::{GetMemberHandler, GetMemberQuery};
pub use list_members::{ListMemberSummariesHandler, ListMembersHandler};
