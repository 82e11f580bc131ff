//! API DTOs (Data Transfer Objects)
//!
//! Shapes follow what the web client already reads; ids are plain integers
//! and timestamps RFC 3339.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::application::AttendanceSheet;
use crate::domain::entity::{
    application::MembershipApplication,
    attendance::{AttendanceEntry, DATE_FORMAT},
    grade::Grade,
    member::{Member, RoleChange},
    news::NewsArticle,
};

/// `{success: true, id}` for endpoints that create a record
#[derive(Debug, Clone, Serialize)]
pub struct CreatedResponse {
    pub success: bool,
    pub id: i32,
}

impl CreatedResponse {
    pub fn new(id: i32) -> Self {
        Self { success: true, id }
    }
}

// ============================================================================
// Applications
// ============================================================================

/// Public join form
#[derive(Debug, Clone, Deserialize)]
pub struct SubmitApplicationRequest {
    pub full_name: String,
    pub email: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub message: String,
}

/// Admin review
#[derive(Debug, Clone, Deserialize)]
pub struct ReviewApplicationRequest {
    pub id: i32,
    pub status: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct ApplicationResponse {
    pub id: i32,
    pub full_name: String,
    pub email: String,
    pub phone: String,
    pub message: String,
    pub status: String,
    pub created_at: DateTime<Utc>,
}

impl From<MembershipApplication> for ApplicationResponse {
    fn from(app: MembershipApplication) -> Self {
        Self {
            id: app.id.value(),
            full_name: app.full_name,
            email: app.email,
            phone: app.phone,
            message: app.message,
            status: app.status.code().to_string(),
            created_at: app.created_at,
        }
    }
}

// ============================================================================
// Attendance
// ============================================================================

#[derive(Debug, Clone, Default, Deserialize)]
pub struct AttendanceQuery {
    pub date: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct MarkAttendanceRequest {
    pub user_id: i32,
    pub date: Option<String>,
    pub present: Option<bool>,
    pub notes: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct AttendanceEntryResponse {
    pub id: i32,
    pub full_name: String,
    pub email: Option<String>,
    pub present: bool,
    pub notes: Option<String>,
}

impl From<AttendanceEntry> for AttendanceEntryResponse {
    fn from(entry: AttendanceEntry) -> Self {
        Self {
            id: entry.member_id.value(),
            full_name: entry.full_name,
            email: entry.email,
            present: entry.present,
            notes: entry.notes,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct AttendanceSheetResponse {
    pub date: String,
    pub attendance: Vec<AttendanceEntryResponse>,
}

impl From<AttendanceSheet> for AttendanceSheetResponse {
    fn from(sheet: AttendanceSheet) -> Self {
        Self {
            date: sheet.date.format(DATE_FORMAT).to_string(),
            attendance: sheet.entries.into_iter().map(Into::into).collect(),
        }
    }
}

// ============================================================================
// Members
// ============================================================================

/// Query flags of `GET /members` and the `id` of `DELETE /members`.
///
/// Kept as raw strings so malformed values produce JSON errors.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct MembersQuery {
    pub show_deleted: Option<String>,
    pub history: Option<String>,
    pub grades: Option<String>,
    pub user_id: Option<String>,
    pub id: Option<String>,
}

impl MembersQuery {
    pub fn flag(value: &Option<String>) -> bool {
        value.as_deref() == Some("true")
    }
}

/// Body of `POST /members` with `action = "restore_user"`
#[derive(Debug, Clone, Deserialize)]
pub struct RestoreMemberRequest {
    pub user_id: i32,
}

/// Body of `POST /members` with `action = "add_grade"`
#[derive(Debug, Clone, Deserialize)]
pub struct AddGradeRequest {
    pub user_id: i32,
    pub category: String,
    pub score: i32,
    pub comment: Option<String>,
}

/// Body of `PUT /members`
#[derive(Debug, Clone, Deserialize)]
pub struct ChangeRoleRequest {
    pub id: i32,
    pub role: String,
    pub admin_id: Option<i32>,
    pub reason: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct MemberResponse {
    pub id: i32,
    pub email: Option<String>,
    pub full_name: String,
    pub role: String,
    pub created_at: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub deleted_at: Option<DateTime<Utc>>,
}

impl From<Member> for MemberResponse {
    fn from(member: Member) -> Self {
        Self {
            id: member.id.value(),
            email: member.email,
            full_name: member.full_name,
            role: member.role.code().to_string(),
            created_at: member.created_at,
            deleted_at: member.deleted_at,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct RoleChangeResponse {
    pub id: i32,
    pub user_id: i32,
    pub user_name: String,
    pub user_email: Option<String>,
    pub old_role: String,
    pub new_role: String,
    pub changed_by_admin_id: Option<i32>,
    pub admin_name: Option<String>,
    pub changed_at: DateTime<Utc>,
    pub reason: Option<String>,
}

impl From<RoleChange> for RoleChangeResponse {
    fn from(change: RoleChange) -> Self {
        Self {
            id: change.id.value(),
            user_id: change.member_id.value(),
            user_name: change.member_name,
            user_email: change.member_email,
            old_role: change.old_role,
            new_role: change.new_role,
            changed_by_admin_id: change.changed_by.map(|id| id.value()),
            admin_name: change.admin_name,
            changed_at: change.changed_at,
            reason: change.reason,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct GradeResponse {
    pub id: i32,
    pub user_id: i32,
    pub user_name: String,
    pub category: String,
    pub score: i32,
    pub comment: Option<String>,
    pub graded_by: Option<i32>,
    pub graded_by_name: Option<String>,
    pub graded_at: DateTime<Utc>,
}

impl From<Grade> for GradeResponse {
    fn from(grade: Grade) -> Self {
        Self {
            id: grade.id.value(),
            user_id: grade.member_id.value(),
            user_name: grade.member_name,
            category: grade.category,
            score: grade.score,
            comment: grade.comment,
            graded_by: grade.graded_by.map(|id| id.value()),
            graded_by_name: grade.graded_by_name,
            graded_at: grade.graded_at,
        }
    }
}

// ============================================================================
// News
// ============================================================================

#[derive(Debug, Clone, Deserialize)]
pub struct PublishNewsRequest {
    pub title: String,
    pub content: String,
    pub image_url: Option<String>,
    pub video_url: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct NewsResponse {
    pub id: i32,
    pub title: String,
    pub content: String,
    pub author_id: Option<i32>,
    pub author_name: Option<String>,
    pub image_url: Option<String>,
    pub video_url: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl From<NewsArticle> for NewsResponse {
    fn from(article: NewsArticle) -> Self {
        Self {
            id: article.id.value(),
            title: article.title,
            content: article.content,
            author_id: article.author_id.map(|id| id.value()),
            author_name: article.author_name,
            image_url: article.image_url,
            video_url: article.video_url,
            created_at: article.created_at,
        }
    }
}
