//! Check Session Use Case
//!
//! Resolves a bearer token to the signed-in member.

use std::sync::Arc;

use chrono::{DateTime, Utc};

use crate::domain::entity::{auth_session::AuthSession, member_account::MemberAccount};
use crate::domain::repository::{AuthSessionRepository, MemberAccountRepository};
use crate::error::AuthResult;

/// Outcome of a session lookup
#[derive(Debug, Clone)]
pub enum SessionStatus {
    Anonymous,
    Authenticated {
        account: MemberAccount,
        expires_at: DateTime<Utc>,
    },
}

/// Check session use case
pub struct CheckSessionUseCase<M, S>
where
    M: MemberAccountRepository,
    S: AuthSessionRepository,
{
    account_repo: Arc<M>,
    session_repo: Arc<S>,
}

impl<M, S> CheckSessionUseCase<M, S>
where
    M: MemberAccountRepository,
    S: AuthSessionRepository,
{
    pub fn new(account_repo: Arc<M>, session_repo: Arc<S>) -> Self {
        Self {
            account_repo,
            session_repo,
        }
    }

    pub async fn execute(&self, token: Option<&str>) -> AuthResult<SessionStatus> {
        let Some(token) = token else {
            return Ok(SessionStatus::Anonymous);
        };

        let digest = AuthSession::digest(token);
        let Some(session) = self.session_repo.find_by_digest(&digest).await? else {
            return Ok(SessionStatus::Anonymous);
        };

        if session.is_expired() {
            self.session_repo.delete(&digest).await?;
            tracing::debug!(member_id = %session.member_id, "Expired session removed");
            return Ok(SessionStatus::Anonymous);
        }

        match self.account_repo.find_by_id(session.member_id).await? {
            Some(account) if account.is_active() => Ok(SessionStatus::Authenticated {
                account,
                expires_at: session.expires_at,
            }),
            _ => {
                let revoked = self
                    .session_repo
                    .delete_all_for_member(session.member_id)
                    .await?;
                tracing::info!(
                    member_id = %session.member_id,
                    revoked = revoked,
                    "Sessions of removed member revoked"
                );
                Ok(SessionStatus::Anonymous)
            }
        }
    }
}
