//! Profile handlers.

mod change_password;
mod get_profile;
mod update_profile;

pub use change_password::{ChangePasswordCommand, ChangePasswordHandler};
pub use get_profile::GetProfileHandler;
pub use update_profile::{
    UpdateAccountCommand, UpdateAccountHandler, UpdateProfileCommand, UpdateProfileHandler,
};

#[cfg(test)]
pub(crate) mod test_support {
    use argon2::Params;

    use crate::adapters::memory::InMemoryUserStore;
    use crate::domain::foundation::FirebaseUid;
    use crate::domain::user::{NewUser, PasswordPolicy, PasswordService, Role, User};
    use crate::ports::UserRepository;

    pub fn cheap_passwords() -> PasswordService {
        PasswordService::with_params(PasswordPolicy::default(), Params::new(4096, 1, 1, None).unwrap())
    }

    pub async fn seed_user(
        store: &InMemoryUserStore,
        email: &str,
        password_hash: Option<String>,
    ) -> User {
        store
            .create_with_profile(&NewUser {
                first_name: "Rowena".into(),
                last_name: "Cruz".into(),
                email: email.into(),
                email_verified: true,
                firebase_uid: Some(FirebaseUid::new(format!("uid-{}", email)).unwrap()),
                id_school_number: Some("2020-7777".into()),
                role: Role::User,
                password_hash,
            })
            .await
            .unwrap()
    }
}
