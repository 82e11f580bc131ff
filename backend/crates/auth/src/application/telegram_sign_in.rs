//! Telegram Sign In Use Case
//!
//! Verifies a login widget payload, finds or creates the linked account
//! and creates a session.

use std::sync::Arc;

use chrono::Utc;
use serde_json::{Map, Value};

use crate::application::config::AuthConfig;
use crate::application::session::{SignedIn, start_session};
use crate::domain::entity::member_account::{MemberAccount, NewMemberAccount};
use crate::domain::repository::{AuthSessionRepository, MemberAccountRepository};
use crate::domain::value_object::{full_name::FullName, telegram_login::LoginAssertion};
use crate::error::{AuthError, AuthResult};

/// Telegram sign in use case
pub struct TelegramSignInUseCase<M, S>
where
    M: MemberAccountRepository,
    S: AuthSessionRepository,
{
    account_repo: Arc<M>,
    session_repo: Arc<S>,
    config: Arc<AuthConfig>,
}

impl<M, S> TelegramSignInUseCase<M, S>
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

    pub async fn execute(&self, payload: &Map<String, Value>) -> AuthResult<SignedIn> {
        let bot_token = self
            .config
            .telegram_secret()
            .ok_or(AuthError::TelegramNotConfigured)?;

        let assertion = LoginAssertion::from_json(payload);
        if !assertion.verify(bot_token) {
            return Err(AuthError::TelegramSignatureInvalid);
        }

        self.check_freshness(&assertion)?;

        let telegram_id = assertion
            .telegram_id()
            .ok_or(AuthError::TelegramPayloadInvalid("id must be an integer"))?;

        let account = match self.account_repo.find_by_telegram_id(telegram_id).await? {
            Some(account) => account,
            None => self.create_account(telegram_id, &assertion).await?,
        };

        if !account.is_active() {
            tracing::warn!(
                member_id = %account.member_id,
                "Telegram sign-in on removed account"
            );
            return Err(AuthError::AccountRemoved);
        }

        tracing::info!(
            member_id = %account.member_id,
            telegram_id = telegram_id,
            "Member signed in with Telegram"
        );

        start_session(self.session_repo.as_ref(), &self.config, account).await
    }

    /// Reject replays of old payloads and payloads dated in the future
    fn check_freshness(&self, assertion: &LoginAssertion) -> AuthResult<()> {
        let auth_date = assertion
            .auth_date()
            .ok_or(AuthError::TelegramAuthExpired)?;
        let age = Utc::now().timestamp().saturating_sub(auth_date);

        if age > self.config.telegram_auth_max_age_secs()
            || age.saturating_neg() > self.config.telegram_clock_skew_secs()
        {
            tracing::debug!(auth_date = auth_date, age_secs = age, "Stale Telegram login");
            return Err(AuthError::TelegramAuthExpired);
        }
        Ok(())
    }

    async fn create_account(
        &self,
        telegram_id: i64,
        assertion: &LoginAssertion,
    ) -> AuthResult<MemberAccount> {
        let first_name = assertion
            .first_name()
            .ok_or(AuthError::TelegramPayloadInvalid("first_name is required"))?;
        let full_name = FullName::from_parts(first_name, assertion.last_name())?;
        let username = assertion.username().map(str::to_string);

        let account = self
            .account_repo
            .create(&NewMemberAccount::with_telegram(
                telegram_id,
                username,
                full_name,
            ))
            .await?;

        tracing::info!(
            member_id = %account.member_id,
            telegram_id = telegram_id,
            "Member created from Telegram login"
        );

        Ok(account)
    }
}
