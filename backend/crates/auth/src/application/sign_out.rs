//! Sign Out Use Case
//!
//! Invalidates a bearer token.

use std::sync::Arc;

use crate::domain::entity::auth_session::AuthSession;
use crate::domain::repository::AuthSessionRepository;
use crate::error::AuthResult;

/// Sign out use case
pub struct SignOutUseCase<S>
where
    S: AuthSessionRepository,
{
    session_repo: Arc<S>,
}

impl<S> SignOutUseCase<S>
where
    S: AuthSessionRepository,
{
    pub fn new(session_repo: Arc<S>) -> Self {
        Self { session_repo }
    }

    /// Idempotent: unknown tokens are ignored
    pub async fn execute(&self, token: &str) -> AuthResult<()> {
        self.session_repo
            .delete(&AuthSession::digest(token))
            .await?;

        tracing::info!("Member signed out");
        Ok(())
    }
}
