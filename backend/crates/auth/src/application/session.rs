//! Session issuing shared by every sign-in path

use chrono::{DateTime, Duration, Utc};

use crate::application::config::AuthConfig;
use crate::domain::entity::{auth_session::AuthSession, member_account::MemberAccount};
use crate::domain::repository::AuthSessionRepository;
use crate::error::AuthResult;

/// Result of a successful sign-in
#[derive(Debug, Clone)]
pub struct SignedIn {
    /// Clear bearer token, returned to the client exactly once
    pub token: String,
    pub expires_at: DateTime<Utc>,
    pub account: MemberAccount,
}

/// Issue a token for `account` and persist its digest
pub(crate) async fn start_session<S>(
    session_repo: &S,
    config: &AuthConfig,
    account: MemberAccount,
) -> AuthResult<SignedIn>
where
    S: AuthSessionRepository,
{
    let ttl = Duration::seconds(config.session_ttl_secs());
    let (session, token) = AuthSession::issue(account.member_id, ttl);
    session_repo.create(&session).await?;

    Ok(SignedIn {
        token,
        expires_at: session.expires_at,
        account,
    })
}
