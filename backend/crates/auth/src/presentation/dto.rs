//! API DTOs (Data Transfer Objects)
//!
//! Field names are snake_case, which is what the web client sends and reads.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::application::SignedIn;
use crate::domain::entity::member_account::MemberAccount;

// ============================================================================
// Register / Login
// ============================================================================

/// Register request
#[derive(Debug, Clone, Deserialize)]
pub struct RegisterRequest {
    pub email: String,
    pub password: String,
    pub full_name: String,
}

/// Login request
#[derive(Debug, Clone, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Public view of a member account
#[derive(Debug, Clone, Serialize)]
pub struct MemberProfile {
    pub id: i32,
    pub email: Option<String>,
    pub full_name: String,
    pub role: String,
}

impl From<&MemberAccount> for MemberProfile {
    fn from(account: &MemberAccount) -> Self {
        Self {
            id: account.member_id.value(),
            email: account.email.as_ref().map(|e| e.as_str().to_string()),
            full_name: account.full_name.as_str().to_string(),
            role: account.role.code().to_string(),
        }
    }
}

/// Response of every successful sign-in path
#[derive(Debug, Clone, Serialize)]
pub struct AuthResponse {
    pub success: bool,
    pub token: String,
    pub user: MemberProfile,
}

impl From<SignedIn> for AuthResponse {
    fn from(signed_in: SignedIn) -> Self {
        Self {
            success: true,
            user: MemberProfile::from(&signed_in.account),
            token: signed_in.token,
        }
    }
}

// ============================================================================
// Session Status
// ============================================================================

/// Session status response
#[derive(Debug, Clone, Serialize)]
pub struct SessionStatusResponse {
    pub authenticated: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user: Option<MemberProfile>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expires_at: Option<DateTime<Utc>>,
}

/// Plain acknowledgement
#[derive(Debug, Clone, Serialize)]
pub struct SuccessResponse {
    pub success: bool,
}
