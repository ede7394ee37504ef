//! LogoutHandler - Acknowledges a client sign-out.
//!
//! ID tokens are stateless, so nothing is revoked here. The handler records
//! the sign-out and returns the time it was acknowledged.

use crate::domain::foundation::{DomainError, Timestamp, UserId};

#[derive(Debug, Clone)]
pub struct LogoutCommand {
    /// Clients may sign out without naming the account.
    pub user_id: Option<UserId>,
}

#[derive(Debug, Default)]
pub struct LogoutHandler;

impl LogoutHandler {
    pub fn new() -> Self {
        Self
    }

    pub async fn handle(&self, cmd: LogoutCommand) -> Result<Timestamp, DomainError> {
        let at = Timestamp::now();
        match cmd.user_id {
            Some(user_id) => tracing::info!(%user_id, "User logged out"),
            None => tracing::info!("Anonymous logout"),
        }
        Ok(at)
    }
}
