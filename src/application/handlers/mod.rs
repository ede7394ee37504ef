//! Application handlers.
//!
//! Command and query handlers that orchestrate domain operations.

pub mod auth;
pub mod directory;
pub mod event;
pub mod member;
pub mod profile;
pub mod requirement;

pub use auth::{
    GetUserByIdNumberHandler, GetUserByIdNumberQuery, LogoutCommand, LogoutHandler,
    RegisterCommand, RegisterHandler, RegisterResult, RequireAdminHandler, VerifyTokenCommand,
    VerifyTokenHandler, VerifyTokenResult,
};
pub use directory::ListUsersHandler;
pub use event::{
    CheckRegistrationHandler, CheckRegistrationQuery, CreateEventHandler, ListThisMonthHandler,
    MonthEvents, RegisterParticipantCommand, RegisterParticipantHandler,
};
pub use member::{
    CheckMemberHandler, CheckMemberQuery, CreateMemberHandler, GetMemberHandler, GetMemberQuery,
    ListMemberSummariesHandler, ListMembersHandler,
};
pub use profile::{
    ChangePasswordCommand, ChangePasswordHandler, GetProfileHandler, UpdateAccountCommand,
    UpdateAccountHandler, UpdateProfileCommand, UpdateProfileHandler,
};
pub use requirement::{
    ArchiveRequirementHandler, CreateRequirementHandler, ListRequirementsHandler,
    ListRequirementsQuery, RecordComplianceCommand, RecordComplianceHandler,
    UpdateRequirementCommand, UpdateRequirementHandler,
};
