use derive_more::Display;
use kernel::error::app_error::{AppError, AppResult};
use serde::{Deserialize, Serialize};

/// Stored role of a member account
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Display, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MemberRole {
    #[default]
    #[display("member")]
    Member,
    #[display("admin")]
    Admin,
}

impl MemberRole {
    #[inline]
    pub const fn code(&self) -> &'static str {
        match self {
            MemberRole::Member => "member",
            MemberRole::Admin => "admin",
        }
    }

    #[inline]
    pub const fn is_admin(&self) -> bool {
        matches!(self, MemberRole::Admin)
    }

    pub fn from_code(code: &str) -> AppResult<Self> {
        match code {
            "member" => Ok(MemberRole::Member),
            "admin" => Ok(MemberRole::Admin),
            other => {
                tracing::error!(role = %other, "Unknown member role code");
                Err(AppError::bad_request(format!("Unknown role: {}", other))
                    .with_action("Use one of: admin, member"))
            }
        }
    }
}
