//! PostgreSQL Repository Implementations

use auth::models::member_role::MemberRole;
use chrono::{DateTime, NaiveDate, Utc};
use kernel::id::{ApplicationId, GradeId, MemberId, NewsId, RoleChangeId};
use sqlx::PgPool;

use crate::domain::entity::{
    application::{MembershipApplication, NewApplication},
    attendance::{AttendanceEntry, AttendanceMark},
    grade::{Grade, NewGrade},
    member::{Member, RoleChange, RoleChangeOutcome, RoleChangeRequest},
    news::{NewArticle, NewsArticle},
};
use crate::domain::repository::{
    ApplicationRepository, AttendanceRepository, GradeRepository, MemberRepository,
    NewsRepository,
};
use crate::domain::value_object::application_status::ApplicationStatus;
use crate::error::{ClubError, ClubResult};

/// PostgreSQL-backed club repository
#[derive(Clone)]
pub struct PgClubRepository {
    pool: PgPool,
}

impl PgClubRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

// ============================================================================
// Application Repository Implementation
// ============================================================================

impl ApplicationRepository for PgClubRepository {
    async fn submit(&self, application: &NewApplication) -> ClubResult<ApplicationId> {
        let id: i32 = sqlx::query_scalar(
            r#"
            INSERT INTO applications (full_name, email, phone, message, status)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id
            "#,
        )
        .bind(application.full_name.as_str())
        .bind(application.email.as_str())
        .bind(&application.phone)
        .bind(&application.message)
        .bind(ApplicationStatus::Pending.code())
        .fetch_one(&self.pool)
        .await?;

        Ok(ApplicationId::new(id))
    }

    async fn list_applications(&self) -> ClubResult<Vec<MembershipApplication>> {
        let rows = sqlx::query_as::<_, ApplicationRow>(
            r#"
            SELECT id, full_name, email, phone, message, status, created_at
            FROM applications
            ORDER BY created_at DESC, id DESC
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(ApplicationRow::into_application).collect()
    }

    async fn set_status(&self, id: ApplicationId, status: ApplicationStatus) -> ClubResult<bool> {
        let updated = sqlx::query("UPDATE applications SET status = $2 WHERE id = $1")
            .bind(id.value())
            .bind(status.code())
            .execute(&self.pool)
            .await?
            .rows_affected();

        Ok(updated > 0)
    }
}

// ============================================================================
// Attendance Repository Implementation
// ============================================================================

impl AttendanceRepository for PgClubRepository {
    async fn sheet(&self, date: NaiveDate) -> ClubResult<Vec<AttendanceEntry>> {
        let rows = sqlx::query_as::<_, AttendanceRow>(
            r#"
            SELECT
                u.id,
                u.full_name,
                u.email,
                COALESCE(a.present, FALSE) AS present,
                a.notes
            FROM users u
            LEFT JOIN attendance a ON a.user_id = u.id AND a.date = $1
            WHERE u.role = $2 AND u.deleted_at IS NULL
            ORDER BY u.full_name, u.id
            "#,
        )
        .bind(date)
        .bind(MemberRole::Member.code())
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(AttendanceRow::into_entry).collect())
    }

    async fn upsert_mark(&self, mark: &AttendanceMark) -> ClubResult<()> {
        sqlx::query(
            r#"
            INSERT INTO attendance (user_id, date, present, notes)
            VALUES ($1, $2, $3, $4)
            ON CONFLICT (user_id, date)
            DO UPDATE SET present = EXCLUDED.present, notes = EXCLUDED.notes
            "#,
        )
        .bind(mark.member_id.value())
        .bind(mark.date)
        .bind(mark.present)
        .bind(&mark.notes)
        .execute(&self.pool)
        .await?;

        Ok(())
    }
}

// ============================================================================
// Member Repository Implementation
// ============================================================================

impl MemberRepository for PgClubRepository {
    async fn list_active(&self) -> ClubResult<Vec<Member>> {
        let rows = sqlx::query_as::<_, MemberRow>(
            r#"
            SELECT id, email, full_name, role, created_at, deleted_at
            FROM users
            WHERE deleted_at IS NULL
            ORDER BY created_at DESC, id DESC
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(MemberRow::into_member).collect()
    }

    async fn list_removed(&self) -> ClubResult<Vec<Member>> {
        let rows = sqlx::query_as::<_, MemberRow>(
            r#"
            SELECT id, email, full_name, role, created_at, deleted_at
            FROM users
            WHERE deleted_at IS NOT NULL
            ORDER BY deleted_at DESC, id DESC
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(MemberRow::into_member).collect()
    }

    async fn find_member(&self, id: MemberId) -> ClubResult<Option<Member>> {
        let row = sqlx::query_as::<_, MemberRow>(
            r#"
            SELECT id, email, full_name, role, created_at, deleted_at
            FROM users
            WHERE id = $1
            "#,
        )
        .bind(id.value())
        .fetch_optional(&self.pool)
        .await?;

        row.map(MemberRow::into_member).transpose()
    }

    async fn soft_delete(&self, id: MemberId) -> ClubResult<bool> {
        let mut tx = self.pool.begin().await?;

        let updated = sqlx::query(
            r#"
            UPDATE users
            SET deleted_at = NOW()
            WHERE id = $1 AND deleted_at IS NULL AND role <> $2
            "#,
        )
        .bind(id.value())
        .bind(MemberRole::Admin.code())
        .execute(&mut *tx)
        .await?
        .rows_affected();

        if updated == 0 {
            tx.rollback().await?;
            return Ok(false);
        }

        let revoked = sqlx::query("DELETE FROM auth_sessions WHERE user_id = $1")
            .bind(id.value())
            .execute(&mut *tx)
            .await?
            .rows_affected();

        tx.commit().await?;

        tracing::debug!(member_id = %id, sessions_revoked = revoked, "Sessions revoked");
        Ok(true)
    }

    async fn restore(&self, id: MemberId) -> ClubResult<bool> {
        let updated = sqlx::query("UPDATE users SET deleted_at = NULL WHERE id = $1")
            .bind(id.value())
            .execute(&self.pool)
            .await?
            .rows_affected();

        Ok(updated > 0)
    }

    async fn change_role(
        &self,
        request: &RoleChangeRequest,
    ) -> ClubResult<Option<RoleChangeOutcome>> {
        let mut tx = self.pool.begin().await?;

        let current: Option<String> =
            sqlx::query_scalar("SELECT role FROM users WHERE id = $1 FOR UPDATE")
                .bind(request.member_id.value())
                .fetch_optional(&mut *tx)
                .await?;

        let Some(current) = current else {
            tx.rollback().await?;
            return Ok(None);
        };
        let current = decode_role(request.member_id.value(), &current)?;

        if current == request.new_role {
            tx.rollback().await?;
            return Ok(Some(RoleChangeOutcome::Unchanged));
        }

        sqlx::query("UPDATE users SET role = $2 WHERE id = $1")
            .bind(request.member_id.value())
            .bind(request.new_role.code())
            .execute(&mut *tx)
            .await?;

        sqlx::query(
            r#"
            INSERT INTO role_history (user_id, old_role, new_role, changed_by_admin_id, reason)
            VALUES ($1, $2, $3, $4, $5)
            "#,
        )
        .bind(request.member_id.value())
        .bind(current.code())
        .bind(request.new_role.code())
        .bind(request.changed_by.map(|id| id.value()))
        .bind(request.reason.as_deref())
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;

        Ok(Some(RoleChangeOutcome::Changed {
            from: current,
            to: request.new_role,
        }))
    }

    async fn role_history(&self) -> ClubResult<Vec<RoleChange>> {
        let rows = sqlx::query_as::<_, RoleChangeRow>(
            r#"
            SELECT
                rh.id,
                rh.user_id,
                u.full_name AS user_name,
                u.email AS user_email,
                rh.old_role,
                rh.new_role,
                rh.changed_by_admin_id,
                admin.full_name AS admin_name,
                rh.changed_at,
                rh.reason
            FROM role_history rh
            JOIN users u ON u.id = rh.user_id
            LEFT JOIN users admin ON admin.id = rh.changed_by_admin_id
            ORDER BY rh.changed_at DESC, rh.id DESC
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(RoleChangeRow::into_change).collect())
    }
}

// ============================================================================
// Grade Repository Implementation
// ============================================================================

impl GradeRepository for PgClubRepository {
    async fn add_grade(&self, grade: &NewGrade) -> ClubResult<GradeId> {
        let id: i32 = sqlx::query_scalar(
            r#"
            INSERT INTO grades (user_id, category, score, comment, graded_by)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id
            "#,
        )
        .bind(grade.member_id.value())
        .bind(grade.category.as_str())
        .bind(grade.score.value())
        .bind(grade.comment.as_deref())
        .bind(grade.graded_by.map(|id| id.value()))
        .fetch_one(&self.pool)
        .await?;

        Ok(GradeId::new(id))
    }

    async fn list_grades(&self, member: Option<MemberId>) -> ClubResult<Vec<Grade>> {
        let rows = sqlx::query_as::<_, GradeRow>(
            r#"
            SELECT
                g.id,
                g.user_id,
                u.full_name AS user_name,
                g.category,
                g.score,
                g.comment,
                g.graded_by,
                grader.full_name AS graded_by_name,
                g.graded_at
            FROM grades g
            JOIN users u ON u.id = g.user_id
            LEFT JOIN users grader ON grader.id = g.graded_by
            WHERE ($1::int IS NULL OR g.user_id = $1)
            ORDER BY g.graded_at DESC, g.id DESC
            "#,
        )
        .bind(member.map(|id| id.value()))
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(GradeRow::into_grade).collect())
    }
}

// ============================================================================
// News Repository Implementation
// ============================================================================

impl NewsRepository for PgClubRepository {
    async fn latest(&self, limit: i64) -> ClubResult<Vec<NewsArticle>> {
        let rows = sqlx::query_as::<_, NewsRow>(
            r#"
            SELECT
                n.id,
                n.title,
                n.content,
                n.author_id,
                u.full_name AS author_name,
                n.image_url,
                n.video_url,
                n.created_at
            FROM news n
            LEFT JOIN users u ON u.id = n.author_id
            ORDER BY n.created_at DESC, n.id DESC
            LIMIT $1
            "#,
        )
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(NewsRow::into_article).collect())
    }

    async fn publish(&self, article: &NewArticle) -> ClubResult<NewsId> {
        let id: i32 = sqlx::query_scalar(
            r#"
            INSERT INTO news (title, content, author_id, image_url, video_url)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id
            "#,
        )
        .bind(&article.title)
        .bind(&article.content)
        .bind(article.author_id.map(|id| id.value()))
        .bind(article.image_url.as_deref())
        .bind(article.video_url.as_deref())
        .fetch_one(&self.pool)
        .await?;

        Ok(NewsId::new(id))
    }
}

fn decode_role(member_id: i32, code: &str) -> ClubResult<MemberRole> {
    MemberRole::from_code(code)
        .map_err(|e| ClubError::Internal(format!("member {}: {}", member_id, e)))
}

// ============================================================================
// Row Types
// ============================================================================

#[derive(sqlx::FromRow)]
struct ApplicationRow {
    id: i32,
    full_name: String,
    email: String,
    phone: String,
    message: String,
    status: String,
    created_at: DateTime<Utc>,
}

impl ApplicationRow {
    fn into_application(self) -> ClubResult<MembershipApplication> {
        let status = ApplicationStatus::from_code(&self.status)
            .map_err(|e| ClubError::Internal(format!("application {}: {}", self.id, e)))?;

        Ok(MembershipApplication {
            id: ApplicationId::new(self.id),
            full_name: self.full_name,
            email: self.email,
            phone: self.phone,
            message: self.message,
            status,
            created_at: self.created_at,
        })
    }
}

#[derive(sqlx::FromRow)]
struct AttendanceRow {
    id: i32,
    full_name: String,
    email: Option<String>,
    present: bool,
    notes: Option<String>,
}

impl AttendanceRow {
    fn into_entry(self) -> AttendanceEntry {
        AttendanceEntry {
            member_id: MemberId::new(self.id),
            full_name: self.full_name,
            email: self.email,
            present: self.present,
            notes: self.notes,
        }
    }
}

#[derive(sqlx::FromRow)]
struct MemberRow {
    id: i32,
    email: Option<String>,
    full_name: String,
    role: String,
    created_at: DateTime<Utc>,
    deleted_at: Option<DateTime<Utc>>,
}

impl MemberRow {
    fn into_member(self) -> ClubResult<Member> {
        Ok(Member {
            id: MemberId::new(self.id),
            role: decode_role(self.id, &self.role)?,
            email: self.email,
            full_name: self.full_name,
            created_at: self.created_at,
            deleted_at: self.deleted_at,
        })
    }
}

#[derive(sqlx::FromRow)]
struct RoleChangeRow {
    id: i32,
    user_id: i32,
    user_name: String,
    user_email: Option<String>,
    old_role: String,
    new_role: String,
    changed_by_admin_id: Option<i32>,
    admin_name: Option<String>,
    changed_at: DateTime<Utc>,
    reason: Option<String>,
}

impl RoleChangeRow {
    fn into_change(self) -> RoleChange {
        RoleChange {
            id: RoleChangeId::new(self.id),
            member_id: MemberId::new(self.user_id),
            member_name: self.user_name,
            member_email: self.user_email,
            old_role: self.old_role,
            new_role: self.new_role,
            changed_by: self.changed_by_admin_id.map(MemberId::new),
            admin_name: self.admin_name,
            changed_at: self.changed_at,
            reason: self.reason,
        }
    }
}

#[derive(sqlx::FromRow)]
struct GradeRow {
    id: i32,
    user_id: i32,
    user_name: String,
    category: String,
    score: i32,
    comment: Option<String>,
    graded_by: Option<i32>,
    graded_by_name: Option<String>,
    graded_at: DateTime<Utc>,
}

impl GradeRow {
    fn into_grade(self) -> Grade {
        Grade {
            id: GradeId::new(self.id),
            member_id: MemberId::new(self.user_id),
            member_name: self.user_name,
            category: self.category,
            score: self.score,
            comment: self.comment,
            graded_by: self.graded_by.map(MemberId::new),
            graded_by_name: self.graded_by_name,
            graded_at: self.graded_at,
        }
    }
}

#[derive(sqlx::FromRow)]
struct NewsRow {
    id: i32,
    title: String,
    content: String,
    author_id: Option<i32>,
    author_name: Option<String>,
    image_url: Option<String>,
    video_url: Option<String>,
    created_at: DateTime<Utc>,
}

impl NewsRow {
    fn into_article(self) -> NewsArticle {
        NewsArticle {
            id: NewsId::new(self.id),
            title: self.title,
            content: self.content,
            author_id: self.author_id.map(MemberId::new),
            author_name: self.author_name,
            image_url: self.image_url,
            video_url: self.video_url,
            created_at: self.created_at,
        }
    }
}
