//! Sign In Use Case
//!
//! Authenticates an email + password account and creates a session.

use std::sync::Arc;

use crate::application::config::AuthConfig;
use crate::application::session::{SignedIn, start_session};
use crate::domain::repository::{AuthSessionRepository, MemberAccountRepository};
use crate::domain::value_object::{email::Email, member_password::RawPassword};
use crate::error::{AuthError, AuthResult};

/// Sign in input
pub struct SignInInput {
    pub email: String,
    pub password: String,
}

/// Sign in use case
pub struct SignInUseCase<M, S>
where
    M: MemberAccountRepository,
    S: AuthSessionRepository,
{
    account_repo: Arc<M>,
    session_repo: Arc<S>,
    config: Arc<AuthConfig>,
}

impl<M, S> SignInUseCase<M, S>
where
    M: MemberAccountRepository,
    S: AuthSessionRepository,
{
    pub fn new(account_repo: Arc<M>, session_repo: Arc<S>, config: Arc<AuthConfig>) -> Self {
        Self {
            account_repo,
            session_repo,
            config,
        }
    }

    /// Every failure collapses into `InvalidCredentials`, so callers cannot
    /// tell an unknown email from a wrong password or a removed account.
    pub async fn execute(&self, input: SignInInput) -> AuthResult<SignedIn> {
        let email = Email::new(input.email).map_err(|_| AuthError::InvalidCredentials)?;
        let password =
            RawPassword::new(input.password).map_err(|_| AuthError::InvalidCredentials)?;

        let account = self
            .account_repo
            .find_by_email(&email)
            .await?
            .ok_or(AuthError::InvalidCredentials)?;

        if !account.verify_password(&password) {
            return Err(AuthError::InvalidCredentials);
        }

        if !account.is_active() {
            tracing::warn!(
                member_id = %account.member_id,
                "Sign-in attempt on removed account"
            );
            return Err(AuthError::InvalidCredentials);
        }

        tracing::info!(member_id = %account.member_id, "Member signed in");

        start_session(self.session_repo.as_ref(), &self.config, account).await
    }
}
