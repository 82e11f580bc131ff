//! Register Use Case
//!
//! Creates an email + password account and signs it in.

use std::sync::Arc;

use crate::application::config::AuthConfig;
use crate::application::session::{SignedIn, start_session};
use crate::domain::entity::member_account::NewMemberAccount;
use crate::domain::repository::{AuthSessionRepository, MemberAccountRepository};
use crate::domain::value_object::{
    email::Email, full_name::FullName, member_password::RawPassword,
};
use crate::error::{AuthError, AuthResult};

/// Register input
pub struct RegisterInput {
    pub email: String,
    pub password: String,
    pub full_name: String,
}

/// Register use case
pub struct RegisterUseCase<M, S>
where
    M: MemberAccountRepository,
    S: AuthSessionRepository,
{
    account_repo: Arc<M>,
    session_repo: Arc<S>,
    config: Arc<AuthConfig>,
}

impl<M, S> RegisterUseCase<M, S>
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

    pub async fn execute(&self, input: RegisterInput) -> AuthResult<SignedIn> {
        let email = Email::new(input.email)?;
        let full_name = FullName::new(input.full_name)?;
        let password = RawPassword::new(input.password)?;

        if self.account_repo.exists_by_email(&email).await? {
            return Err(AuthError::EmailTaken);
        }

        let account = self
            .account_repo
            .create(&NewMemberAccount::with_password(email, &password, full_name))
            .await?;

        tracing::info!(
            member_id = %account.member_id,
            "Member registered"
        );

        start_session(self.session_repo.as_ref(), &self.config, account).await
    }
}
