//! PostgreSQL Repository Implementations

use chrono::{DateTime, Utc};
use kernel::id::MemberId;
use sqlx::PgPool;

use crate::domain::entity::{
    auth_session::AuthSession,
    member_account::{MemberAccount, NewMemberAccount},
};
use crate::domain::repository::{AuthSessionRepository, MemberAccountRepository};
use crate::domain::value_object::{
    email::Email, full_name::FullName, member_password::StoredPassword, member_role::MemberRole,
};
use crate::error::{AuthError, AuthResult};

/// PostgreSQL unique violation
const UNIQUE_VIOLATION: &str = "23505";

/// Unique constraint on `users.email`
const EMAIL_CONSTRAINT: &str = "users_email_key";

const MEMBER_COLUMNS: &str = r#"
    id,
    email,
    password_hash,
    full_name,
    role,
    telegram_id,
    telegram_username,
    created_at,
    deleted_at
"#;

/// PostgreSQL-backed auth repository
#[derive(Clone)]
pub struct PgAuthRepository {
    pool: PgPool,
}

impl PgAuthRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn fetch_member(
        &self,
        filter: &str,
        bind: MemberLookup<'_>,
    ) -> AuthResult<Option<MemberAccount>> {
        let sql = format!("SELECT {MEMBER_COLUMNS} FROM users WHERE {filter}");
        let query = sqlx::query_as::<_, MemberRow>(&sql);
        let row = match bind {
            MemberLookup::Id(id) => query.bind(id),
            MemberLookup::Email(email) => query.bind(email),
            MemberLookup::Telegram(telegram_id) => query.bind(telegram_id),
        }
        .fetch_optional(&self.pool)
        .await?;

        row.map(MemberRow::into_account).transpose()
    }
}

enum MemberLookup<'a> {
    Id(i32),
    Email(&'a str),
    Telegram(i64),
}

// ============================================================================
// Member Account Repository Implementation
// ============================================================================

impl MemberAccountRepository for PgAuthRepository {
    async fn create(&self, account: &NewMemberAccount) -> AuthResult<MemberAccount> {
        let sql = format!(
            r#"
            INSERT INTO users (
                email,
                password_hash,
                full_name,
                role,
                telegram_id,
                telegram_username
            ) VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING {MEMBER_COLUMNS}
            "#
        );

        let row = sqlx::query_as::<_, MemberRow>(&sql)
            .bind(account.email.as_ref().map(Email::as_str))
            .bind(account.password.as_ref().map(StoredPassword::as_db))
            .bind(account.full_name.as_str())
            .bind(account.role.code())
            .bind(account.telegram_id)
            .bind(account.telegram_username.as_deref())
            .fetch_one(&self.pool)
            .await
            .map_err(map_unique_violation)?;

        row.into_account()
    }

    async fn find_by_id(&self, member_id: MemberId) -> AuthResult<Option<MemberAccount>> {
        self.fetch_member("id = $1", MemberLookup::Id(member_id.value()))
            .await
    }

    async fn find_by_email(&self, email: &Email) -> AuthResult<Option<MemberAccount>> {
        self.fetch_member("email = $1", MemberLookup::Email(email.as_str()))
            .await
    }

    async fn find_by_telegram_id(&self, telegram_id: i64) -> AuthResult<Option<MemberAccount>> {
        self.fetch_member("telegram_id = $1", MemberLookup::Telegram(telegram_id))
            .await
    }

    async fn exists_by_email(&self, email: &Email) -> AuthResult<bool> {
        let exists: bool =
            sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM users WHERE email = $1)")
                .bind(email.as_str())
                .fetch_one(&self.pool)
                .await?;

        Ok(exists)
    }
}

// ============================================================================
// Auth Session Repository Implementation
// ============================================================================

impl AuthSessionRepository for PgAuthRepository {
    async fn create(&self, session: &AuthSession) -> AuthResult<()> {
        sqlx::query(
            r#"
            INSERT INTO auth_sessions (
                token_digest,
                user_id,
                created_at,
                expires_at
            ) VALUES ($1, $2, $3, $4)
            "#,
        )
        .bind(&session.token_digest)
        .bind(session.member_id.value())
        .bind(session.created_at)
        .bind(session.expires_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn find_by_digest(&self, token_digest: &str) -> AuthResult<Option<AuthSession>> {
        let row = sqlx::query_as::<_, AuthSessionRow>(
            r#"
            SELECT token_digest, user_id, created_at, expires_at
            FROM auth_sessions
            WHERE token_digest = $1
            "#,
        )
        .bind(token_digest)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(AuthSessionRow::into_session))
    }

    async fn delete(&self, token_digest: &str) -> AuthResult<()> {
        sqlx::query("DELETE FROM auth_sessions WHERE token_digest = $1")
            .bind(token_digest)
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    async fn delete_all_for_member(&self, member_id: MemberId) -> AuthResult<u64> {
        let deleted = sqlx::query("DELETE FROM auth_sessions WHERE user_id = $1")
            .bind(member_id.value())
            .execute(&self.pool)
            .await?
            .rows_affected();

        Ok(deleted)
    }

    async fn cleanup_expired(&self) -> AuthResult<u64> {
        let deleted = sqlx::query("DELETE FROM auth_sessions WHERE expires_at <= NOW()")
            .execute(&self.pool)
            .await?
            .rows_affected();

        tracing::info!(sessions_deleted = deleted, "Cleaned up expired auth sessions");

        Ok(deleted)
    }
}

fn map_unique_violation(err: sqlx::Error) -> AuthError {
    match &err {
        sqlx::Error::Database(db_err)
            if db_err.code().as_deref() == Some(UNIQUE_VIOLATION)
                && db_err.constraint() == Some(EMAIL_CONSTRAINT) =>
        {
            AuthError::EmailTaken
        }
        _ => AuthError::Database(err),
    }
}

// ============================================================================
// Row Types
// ============================================================================

#[derive(sqlx::FromRow)]
struct MemberRow {
    id: i32,
    email: Option<String>,
    password_hash: Option<String>,
    full_name: String,
    role: String,
    telegram_id: Option<i64>,
    telegram_username: Option<String>,
    created_at: DateTime<Utc>,
    deleted_at: Option<DateTime<Utc>>,
}

impl MemberRow {
    fn into_account(self) -> AuthResult<MemberAccount> {
        let password = self.password_hash.map(StoredPassword::from_db).transpose()?;
        let role = MemberRole::from_code(&self.role)
            .map_err(|e| AuthError::Internal(format!("member {}: {}", self.id, e)))?;

        Ok(MemberAccount {
            member_id: MemberId::new(self.id),
            email: self.email.map(Email::from_db),
            password,
            full_name: FullName::from_db(self.full_name),
            role,
            telegram_id: self.telegram_id,
            telegram_username: self.telegram_username,
            created_at: self.created_at,
            deleted_at: self.deleted_at,
        })
    }
}

#[derive(sqlx::FromRow)]
struct AuthSessionRow {
    token_digest: String,
    user_id: i32,
    created_at: DateTime<Utc>,
    expires_at: DateTime<Utc>,
}

impl AuthSessionRow {
    fn into_session(self) -> AuthSession {
        AuthSession {
            token_digest: self.token_digest,
            member_id: MemberId::new(self.user_id),
            created_at: self.created_at,
            expires_at: self.expires_at,
        }
    }
}
