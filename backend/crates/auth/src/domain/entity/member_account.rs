//! Member Account Entity
//!
//! One row of `users`. An account signs in with email + password, with
//! Telegram, or both. Removed members keep their row with `deleted_at` set.

use chrono::{DateTime, Utc};
use kernel::id::MemberId;

use crate::domain::value_object::{
    email::Email,
    full_name::FullName,
    member_password::{RawPassword, StoredPassword},
    member_role::MemberRole,
};

/// Persisted member account
#[derive(Debug, Clone)]
pub struct MemberAccount {
    pub member_id: MemberId,
    pub email: Option<Email>,
    pub password: Option<StoredPassword>,
    pub full_name: FullName,
    pub role: MemberRole,
    pub telegram_id: Option<i64>,
    pub telegram_username: Option<String>,
    pub created_at: DateTime<Utc>,
    pub deleted_at: Option<DateTime<Utc>>,
}

impl MemberAccount {
    /// Removed members cannot sign in
    pub fn is_active(&self) -> bool {
        self.deleted_at.is_none()
    }

    /// Check a submitted password. Telegram-only accounts never match.
    pub fn verify_password(&self, candidate: &RawPassword) -> bool {
        self.password
            .as_ref()
            .is_some_and(|stored| stored.verify(candidate))
    }
}

/// Account to insert; the database assigns the id
#[derive(Debug, Clone)]
pub struct NewMemberAccount {
    pub email: Option<Email>,
    pub password: Option<StoredPassword>,
    pub full_name: FullName,
    pub role: MemberRole,
    pub telegram_id: Option<i64>,
    pub telegram_username: Option<String>,
}

impl NewMemberAccount {
    /// Email + password registration
    pub fn with_password(email: Email, password: &RawPassword, full_name: FullName) -> Self {
        Self {
            email: Some(email),
            password: Some(password.to_stored()),
            full_name,
            role: MemberRole::Member,
            telegram_id: None,
            telegram_username: None,
        }
    }

    /// First Telegram sign-in
    pub fn with_telegram(
        telegram_id: i64,
        telegram_username: Option<String>,
        full_name: FullName,
    ) -> Self {
        Self {
            email: None,
            password: None,
            full_name,
            role: MemberRole::Member,
            telegram_id: Some(telegram_id),
            telegram_username,
        }
    }

    pub fn into_account(self, member_id: MemberId, created_at: DateTime<Utc>) -> MemberAccount {
        MemberAccount {
            member_id,
            email: self.email,
            password: self.password,
            full_name: self.full_name,
            role: self.role,
            telegram_id: self.telegram_id,
            telegram_username: self.telegram_username,
            created_at,
            deleted_at: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn password(raw: &str) -> RawPassword {
        RawPassword::new(raw.to_string()).unwrap()
    }

    #[test]
    fn test_password_account_verifies() {
        let account = NewMemberAccount::with_password(
            Email::new("anna@club.org").unwrap(),
            &password("correct horse"),
            FullName::new("Anna").unwrap(),
        )
        .into_account(MemberId::new(1), Utc::now());

        assert!(account.is_active());
        assert_eq!(account.role, MemberRole::Member);
        assert!(account.verify_password(&password("correct horse")));
        assert!(!account.verify_password(&password("wrong horse")));
    }

    #[test]
    fn test_telegram_account_has_no_password() {
        let account = NewMemberAccount::with_telegram(
            42,
            Some("anna".to_string()),
            FullName::new("Anna").unwrap(),
        )
        .into_account(MemberId::new(2), Utc::now());

        assert!(account.email.is_none());
        assert!(!account.verify_password(&password("anything")));
    }
}
