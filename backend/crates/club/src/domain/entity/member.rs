//! Member administration entities

use auth::models::member_role::MemberRole;
use chrono::{DateTime, Utc};
use kernel::id::{MemberId, RoleChangeId};

/// Member as listed to admins
#[derive(Debug, Clone)]
pub struct Member {
    pub id: MemberId,
    pub email: Option<String>,
    pub full_name: String,
    pub role: MemberRole,
    pub created_at: DateTime<Utc>,
    pub deleted_at: Option<DateTime<Utc>>,
}

impl Member {
    pub fn is_removed(&self) -> bool {
        self.deleted_at.is_some()
    }
}

/// Requested role change
#[derive(Debug, Clone)]
pub struct RoleChangeRequest {
    pub member_id: MemberId,
    pub new_role: MemberRole,
    pub changed_by: Option<MemberId>,
    pub reason: Option<String>,
}

/// What a role change did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoleChangeOutcome {
    /// Member already had the requested role; nothing recorded
    Unchanged,
    Changed { from: MemberRole, to: MemberRole },
}

/// Row of the role change audit log
#[derive(Debug, Clone)]
pub struct RoleChange {
    pub id: RoleChangeId,
    pub member_id: MemberId,
    pub member_name: String,
    pub member_email: Option<String>,
    pub old_role: String,
    pub new_role: String,
    pub changed_by: Option<MemberId>,
    pub admin_name: Option<String>,
    pub changed_at: DateTime<Utc>,
    pub reason: Option<String>,
}
