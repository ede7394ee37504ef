//! Shared application state for every route.

use std::sync::Arc;

use crate::application::handlers::{
    ArchiveRequirementHandler, ChangePasswordHandler, CheckMemberHandler, CheckRegistrationHandler,
    CreateEventHandler, CreateMemberHandler, CreateRequirementHandler, GetMemberHandler,
    GetProfileHandler, GetUserByIdNumberHandler, ListMemberSummariesHandler, ListMembersHandler,
    ListRequirementsHandler, ListThisMonthHandler, ListUsersHandler, LogoutHandler,
    RecordComplianceHandler, RegisterHandler, RegisterParticipantHandler, RequireAdminHandler,
    UpdateAccountHandler, UpdateProfileHandler, UpdateRequirementHandler, VerifyTokenHandler,
};
use crate::domain::user::PasswordService;
use crate::ports::{
    EventRepository, IdentityProvider, MemberRepository, ProfileRepository,
    RequirementRepository, TokenVerifier, UserRepository,
};

/// Ports shared by all handlers. Cloned per request.
#[derive(Clone)]
pub struct AppState {
    pub token_verifier: Arc<dyn TokenVerifier>,
    pub identity_provider: Arc<dyn IdentityProvider>,
    pub users: Arc<dyn UserRepository>,
    pub profiles: Arc<dyn ProfileRepository>,
    pub members: Arc<dyn MemberRepository>,
    pub events: Arc<dyn EventRepository>,
    pub requirements: Arc<dyn RequirementRepository>,
    pub passwords: Arc<PasswordService>,
}

impl AppState {
    // Identity

    pub fn verify_token_handler(&self) -> VerifyTokenHandler {
        VerifyTokenHandler::new(
            self.token_verifier.clone(),
            self.identity_provider.clone(),
            self.users.clone(),
        )
    }

    pub fn register_handler(&self) -> RegisterHandler {
        RegisterHandler::new(
            self.token_verifier.clone(),
            self.identity_provider.clone(),
            self.users.clone(),
            self.passwords.clone(),
        )
    }

    pub fn logout_handler(&self) -> LogoutHandler {
        LogoutHandler::new()
    }

    pub fn user_by_id_number_handler(&self) -> GetUserByIdNumberHandler {
        GetUserByIdNumberHandler::new(self.users.clone())
    }

    pub fn require_admin_handler(&self) -> RequireAdminHandler {
        RequireAdminHandler::new(self.users.clone())
    }

    // Members

    pub fn create_member_handler(&self) -> CreateMemberHandler {
        CreateMemberHandler::new(self.members.clone())
    }

    pub fn list_members_handler(&self) -> ListMembersHandler {
        ListMembersHandler::new(self.members.clone())
    }

    pub fn get_member_handler(&self) -> GetMemberHandler {
        GetMemberHandler::new(self.members.clone())
    }

    pub fn check_member_handler(&self) -> CheckMemberHandler {
        CheckMemberHandler::new(self.members.clone())
    }

    pub fn member_summaries_handler(&self) -> ListMemberSummariesHandler {
        ListMemberSummariesHandler::new(self.members.clone())
    }

    // Events

    pub fn create_event_handler(&self) -> CreateEventHandler {
        CreateEventHandler::new(self.events.clone())
    }

    pub fn this_month_handler(&self) -> ListThisMonthHandler {
        ListThisMonthHandler::new(self.events.clone())
    }

    pub fn register_participant_handler(&self) -> RegisterParticipantHandler {
        RegisterParticipantHandler::new(self.events.clone(), self.members.clone())
    }

    pub fn check_registration_handler(&self) -> CheckRegistrationHandler {
        CheckRegistrationHandler::new(self.events.clone())
    }

    // Requirements

    pub fn create_requirement_handler(&self) -> CreateRequirementHandler {
        CreateRequirementHandler::new(self.requirements.clone())
    }

    pub fn update_requirement_handler(&self) -> UpdateRequirementHandler {
        UpdateRequirementHandler::new(self.requirements.clone())
    }

    pub fn archive_requirement_handler(&self) -> ArchiveRequirementHandler {
        ArchiveRequirementHandler::new(self.requirements.clone())
    }

    pub fn list_requirements_handler(&self) -> ListRequirementsHandler {
        ListRequirementsHandler::new(self.requirements.clone())
    }

    pub fn record_compliance_handler(&self) -> RecordComplianceHandler {
        RecordComplianceHandler::new(self.requirements.clone(), self.members.clone())
    }

    // Profiles and users

    pub fn get_profile_handler(&self) -> GetProfileHandler {
        GetProfileHandler::new(self.profiles.clone())
    }

    pub fn update_profile_handler(&self) -> UpdateProfileHandler {
        UpdateProfileHandler::new(self.profiles.clone())
    }

    pub fn update_account_handler(&self) -> UpdateAccountHandler {
        UpdateAccountHandler::new(self.profiles.clone())
    }

    pub fn change_password_handler(&self) -> ChangePasswordHandler {
        ChangePasswordHandler::new(self.users.clone(), self.passwords.clone())
    }

    pub fn list_users_handler(&self) -> ListUsersHandler {
        ListUsersHandler::new(self.users.clone())
    }
}
