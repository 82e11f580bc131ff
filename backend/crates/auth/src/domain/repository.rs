//! Repository Traits
//!
//! Interfaces for data persistence. Implementation is in infrastructure layer.

use kernel::id::MemberId;

use crate::domain::entity::{
    auth_session::AuthSession,
    member_account::{MemberAccount, NewMemberAccount},
};
use crate::domain::value_object::email::Email;
use crate::error::AuthResult;

/// Member account repository trait
#[trait_variant::make(MemberAccountRepository: Send)]
pub trait LocalMemberAccountRepository {
    /// Insert a new account and return it with its assigned id.
    ///
    /// Fails with `EmailTaken` when the email is already registered.
    async fn create(&self, account: &NewMemberAccount) -> AuthResult<MemberAccount>;

    /// Find account by ID (removed accounts included)
    async fn find_by_id(&self, member_id: MemberId) -> AuthResult<Option<MemberAccount>>;

    /// Find account by normalized email (removed accounts included)
    async fn find_by_email(&self, email: &Email) -> AuthResult<Option<MemberAccount>>;

    /// Find account linked to a Telegram id (removed accounts included)
    async fn find_by_telegram_id(&self, telegram_id: i64) -> AuthResult<Option<MemberAccount>>;

    /// Check if email exists
    async fn exists_by_email(&self, email: &Email) -> AuthResult<bool>;
}

/// Auth session repository trait
#[trait_variant::make(AuthSessionRepository: Send)]
pub trait LocalAuthSessionRepository {
    /// Persist a newly issued session
    async fn create(&self, session: &AuthSession) -> AuthResult<()>;

    /// Find session by token digest (expired sessions included)
    async fn find_by_digest(&self, token_digest: &str) -> AuthResult<Option<AuthSession>>;

    /// Delete a session
    async fn delete(&self, token_digest: &str) -> AuthResult<()>;

    /// Delete every session of a member
    async fn delete_all_for_member(&self, member_id: MemberId) -> AuthResult<u64>;

    /// Clean up expired sessions
    async fn cleanup_expired(&self) -> AuthResult<u64>;
}
