//! RegisterHandler - Creates a local user for a Firebase identity.
//!
//! Two flows:
//!
//! - **Token**: the client already signed up with Firebase and sends its ID
//!   token. The local user is created for the token's uid.
//! - **Credentials**: the server creates the Firebase account from an email
//!   and password, then the local user. If the local insert fails, the
//!   remote account is deleted again and the insert error is returned.

use std::sync::Arc;

use crate::domain::foundation::{
    non_blank, DomainError, FirebaseUid, NewRemoteIdentity, RemoteIdentity,
};
use crate::domain::user::{PasswordService, RegistrantDetails, SignUpCredentials, User};
use crate::ports::{IdentityProvider, TokenVerifier, UserRepository};

#[derive(Debug, Clone, Default)]
pub struct RegisterCommand {
    pub id_token: Option<String>,
    pub email: Option<String>,
    pub password: Option<String>,
    pub first_name: Option<String>,
    pub name: Option<String>,
    pub last_name: Option<String>,
    pub id_school_number: Option<String>,
}

#[derive(Debug, Clone)]
pub struct RegisterResult {
    pub user: User,
    /// Issued only for server-side sign-ups.
    pub custom_token: Option<String>,
}

pub struct RegisterHandler {
    verifier: Arc<dyn TokenVerifier>,
    identity: Arc<dyn IdentityProvider>,
    users: Arc<dyn UserRepository>,
    passwords: Arc<PasswordService>,
}

impl RegisterHandler {
    pub fn new(
        verifier: Arc<dyn TokenVerifier>,
        identity: Arc<dyn IdentityProvider>,
        users: Arc<dyn UserRepository>,
        passwords: Arc<PasswordService>,
    ) -> Self {
        Self {
            verifier,
            identity,
            users,
            passwords,
        }
    }

    pub async fn handle(&self, cmd: RegisterCommand) -> Result<RegisterResult, DomainError> {
        let details = RegistrantDetails::resolve(
            cmd.first_name,
            cmd.name,
            cmd.last_name,
            cmd.id_school_number,
        );

        match non_blank(cmd.id_token) {
            Some(token) => self.register_with_token(&token, details).await,
            None => {
                let credentials = SignUpCredentials::parse(
                    cmd.email,
                    cmd.password,
                    self.passwords.policy().min_length,
                )?;
                self.register_with_credentials(credentials, details).await
            }
        }
    }

    async fn register_with_token(
        &self,
        token: &str,
        details: RegistrantDetails,
    ) -> Result<RegisterResult, DomainError> {
        let caller = self.verifier.verify(token).await?;
        let remote = self.identity.get_user(&caller.uid).await?;

        if self.users.find_by_firebase_uid(&caller.uid).await?.is_some() {
            return Err(DomainError::conflict("User already exists"));
        }

        let email = remote
            .email
            .clone()
            .or(caller.email)
            .ok_or_else(|| {
                DomainError::validation(
                    "Validation failed",
                    vec!["Identity has no email address".to_string()],
                )
            })?;

        let user = self
            .users
            .create_with_profile(&details.into_new_user(
                email,
                remote.email_verified,
                remote.uid,
                None,
            ))
            .await?;

        tracing::info!(user_id = %user.id, "User registered from ID token");
        Ok(RegisterResult {
            user,
            custom_token: None,
        })
    }

    async fn register_with_credentials(
        &self,
        credentials: SignUpCredentials,
        details: RegistrantDetails,
    ) -> Result<RegisterResult, DomainError> {
        let password_hash = self.passwords.hash_password(&credentials.password)?;

        let display_name = non_blank(Some(
            format!("{} {}", details.first_name, details.last_name)
                .trim()
                .to_string(),
        ));
        let remote = self
            .identity
            .create_user(&NewRemoteIdentity {
                email: credentials.email.clone(),
                password: credentials.password,
                display_name,
            })
            .await?;

        let new_user = details.into_new_user(
            credentials.email,
            remote.email_verified,
            remote.uid.clone(),
            Some(password_hash),
        );
        let user = match self.users.create_with_profile(&new_user).await {
            Ok(user) => user,
            Err(err) => {
                self.compensate(&remote).await;
                return Err(err);
            }
        };

        let custom_token = match self.identity.create_custom_token(&remote.uid).await {
            Ok(token) => Some(token),
            Err(e) => {
                tracing::error!(uid = %remote.uid, error = %e, "Failed to issue custom token");
                None
            }
        };

        tracing::info!(user_id = %user.id, uid = %remote.uid, "User registered with credentials");
        Ok(RegisterResult { user, custom_token })
    }

    /// Best-effort removal of a remote account whose local insert failed.
    async fn compensate(&self, remote: &RemoteIdentity) {
        let uid: &FirebaseUid = &remote.uid;
        match self.identity.delete_user(uid).await {
            Ok(()) => tracing::warn!(%uid, "Local insert failed; remote identity removed"),
            Err(e) => tracing::warn!(
                %uid,
                error = %e,
                "Local insert failed and remote identity could not be removed"
            ),
        }
    }
}
