//! Auth Session Entity
//!
//! A bearer token handed out at sign-in. Only the SHA-256 digest of the
//! token is stored, so a leaked `auth_sessions` table cannot be replayed.

use chrono::{DateTime, Duration, Utc};
use kernel::id::MemberId;
use platform::crypto::{issue_token, sha256_hex};

/// Persisted session
#[derive(Debug, Clone)]
pub struct AuthSession {
    /// Hex SHA-256 of the bearer token
    pub token_digest: String,
    pub member_id: MemberId,
    pub created_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
}

impl AuthSession {
    /// Issue a fresh token for `member_id`.
    ///
    /// Returns the session to persist and the clear token for the response
    /// body; the clear token is not kept anywhere else.
    pub fn issue(member_id: MemberId, ttl: Duration) -> (Self, String) {
        let token = issue_token();
        let now = Utc::now();
        let session = Self {
            token_digest: Self::digest(&token),
            member_id,
            created_at: now,
            expires_at: now + ttl,
        };
        (session, token)
    }

    /// Digest under which a token is stored
    pub fn digest(token: &str) -> String {
        sha256_hex(token.as_bytes())
    }

    pub fn is_expired(&self) -> bool {
        Utc::now() >= self.expires_at
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_issue_stores_digest_only() {
        let (session, token) = AuthSession::issue(MemberId::new(5), Duration::hours(1));
        assert_eq!(token.len(), 43);
        assert_ne!(session.token_digest, token);
        assert_eq!(session.token_digest, AuthSession::digest(&token));
        assert_eq!(session.token_digest.len(), 64);
        assert!(!session.is_expired());
    }

    #[test]
    fn test_zero_ttl_is_expired() {
        let (session, _) = AuthSession::issue(MemberId::new(5), Duration::zero());
        assert!(session.is_expired());
    }
}
