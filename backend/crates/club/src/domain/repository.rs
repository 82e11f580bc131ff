//! Repository Traits
//!
//! Interfaces for data persistence. Implementation is in infrastructure layer.

use chrono::NaiveDate;
use kernel::id::{ApplicationId, GradeId, MemberId, NewsId};

use crate::domain::entity::{
    application::{MembershipApplication, NewApplication},
    attendance::{AttendanceEntry, AttendanceMark},
    grade::{Grade, NewGrade},
    member::{Member, RoleChange, RoleChangeOutcome, RoleChangeRequest},
    news::{NewArticle, NewsArticle},
};
use crate::domain::value_object::application_status::ApplicationStatus;
use crate::error::ClubResult;

/// Membership application repository trait
#[trait_variant::make(ApplicationRepository: Send)]
pub trait LocalApplicationRepository {
    /// Store a new application with status `pending`
    async fn submit(&self, application: &NewApplication) -> ClubResult<ApplicationId>;

    /// All applications, newest first
    async fn list_applications(&self) -> ClubResult<Vec<MembershipApplication>>;

    /// Set the status; `false` when the id is unknown
    async fn set_status(&self, id: ApplicationId, status: ApplicationStatus) -> ClubResult<bool>;
}

/// Attendance repository trait
#[trait_variant::make(AttendanceRepository: Send)]
pub trait LocalAttendanceRepository {
    /// Active members with role `member` and their mark for `date`, by name
    async fn sheet(&self, date: NaiveDate) -> ClubResult<Vec<AttendanceEntry>>;

    /// Insert or replace the mark for (member, date)
    async fn upsert_mark(&self, mark: &AttendanceMark) -> ClubResult<()>;
}

/// Member administration repository trait
#[trait_variant::make(MemberRepository: Send)]
pub trait LocalMemberRepository {
    /// Members without `deleted_at`, newest first
    async fn list_active(&self) -> ClubResult<Vec<Member>>;

    /// Soft-deleted members, most recently removed first
    async fn list_removed(&self) -> ClubResult<Vec<Member>>;

    /// Find member by ID (removed members included)
    async fn find_member(&self, id: MemberId) -> ClubResult<Option<Member>>;

    /// Set `deleted_at` and revoke the member's sessions.
    ///
    /// Admins are never removed. Returns `false` when the member is unknown,
    /// already removed or an admin at the time of the update.
    async fn soft_delete(&self, id: MemberId) -> ClubResult<bool>;

    /// Clear `deleted_at`; `false` when the member is unknown
    async fn restore(&self, id: MemberId) -> ClubResult<bool>;

    /// Change the role and record history atomically.
    ///
    /// `None` when the member is unknown.
    async fn change_role(&self, request: &RoleChangeRequest)
    -> ClubResult<Option<RoleChangeOutcome>>;

    /// Role change log, newest first
    async fn role_history(&self) -> ClubResult<Vec<RoleChange>>;
}

/// Grade repository trait
#[trait_variant::make(GradeRepository: Send)]
pub trait LocalGradeRepository {
    async fn add_grade(&self, grade: &NewGrade) -> ClubResult<GradeId>;

    /// Grades newest first, optionally for one member
    async fn list_grades(&self, member: Option<MemberId>) -> ClubResult<Vec<Grade>>;
}

/// News repository trait
#[trait_variant::make(NewsRepository: Send)]
pub trait LocalNewsRepository {
    /// Most recent articles, newest first
    async fn latest(&self, limit: i64) -> ClubResult<Vec<NewsArticle>>;

    async fn publish(&self, article: &NewArticle) -> ClubResult<NewsId>;
}

/// Everything the club HTTP layer needs from one store
pub trait ClubRepository:
    ApplicationRepository
    + AttendanceRepository
    + MemberRepository
    + GradeRepository
    + NewsRepository
    + Clone
    + Send
    + Sync
    + 'static
{
}

impl<T> ClubRepository for T where
    T: ApplicationRepository
        + AttendanceRepository
        + MemberRepository
        + GradeRepository
        + NewsRepository
        + Clone
        + Send
        + Sync
        + 'static
{
}
