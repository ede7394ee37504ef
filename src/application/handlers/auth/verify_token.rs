//! VerifyTokenHandler - Resolves an ID token to the local user.

use std::sync::Arc;

use serde_json::{Map, Value};

use crate::domain::foundation::{non_blank, DomainError, RemoteIdentity};
use crate::domain::user::User;
use crate::ports::{IdentityProvider, TokenVerifier, UserRepository};

#[derive(Debug, Clone)]
pub struct VerifyTokenCommand {
    pub id_token: Option<String>,
}

#[derive(Debug, Clone)]
pub struct VerifyTokenResult {
    pub user: User,
    pub identity: RemoteIdentity,
    pub claims: Map<String, Value>,
}

pub struct VerifyTokenHandler {
    verifier: Arc<dyn TokenVerifier>,
    identity: Arc<dyn IdentityProvider>,
    users: Arc<dyn UserRepository>,
}

impl VerifyTokenHandler {
    pub fn new(
        verifier: Arc<dyn TokenVerifier>,
        identity: Arc<dyn IdentityProvider>,
        users: Arc<dyn UserRepository>,
    ) -> Self {
        Self {
            verifier,
            identity,
            users,
        }
    }

    pub async fn handle(&self, cmd: VerifyTokenCommand) -> Result<VerifyTokenResult, DomainError> {
        let token = non_blank(cmd.id_token)
            .ok_or_else(|| DomainError::unauthorized("ID token is required"))?;

        let caller = self.verifier.verify(&token).await?;
        let identity = self.identity.get_user(&caller.uid).await?;

        let user = self
            .users
            .find_by_firebase_uid(&caller.uid)
            .await?
            .ok_or_else(|| DomainError::not_found("User not found"))?;

        tracing::debug!(user_id = %user.id, uid = %caller.uid, "ID token verified");

        Ok(VerifyTokenResult {
            user,
            identity,
            claims: caller.claims,
        })
    }
}
