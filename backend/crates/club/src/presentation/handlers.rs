//! HTTP Handlers
//!
//! Admin endpoints consult the role gate before touching storage or
//! decoding request fields, so a denied caller gets 403 for any JSON body.

use axum::Json;
use axum::extract::{Query, State};
use axum::response::{IntoResponse, Response};
use serde_json::Value;
use std::sync::Arc;

use auth::RoleGate;
use auth::middleware::{ActingMember, AssertedRole};
use auth::models::SuccessResponse;
use kernel::error::app_error::AppError;
use kernel::id::{ApplicationId, MemberId};

use crate::application::config::ClubConfig;
use crate::application::{
    AddGradeInput, ApplicationsUseCase, AttendanceUseCase, ChangeRoleInput, GradesUseCase,
    MarkAttendanceInput, MembersUseCase, NewsUseCase, PublishArticleInput, SubmitApplicationInput,
};
use crate::domain::repository::ClubRepository;
use crate::error::{ClubError, ClubResult};
use crate::presentation::dto::{
    AddGradeRequest, ApplicationResponse, AttendanceQuery, AttendanceSheetResponse,
    ChangeRoleRequest, CreatedResponse, GradeResponse, MarkAttendanceRequest, MemberResponse,
    MembersQuery, NewsResponse, PublishNewsRequest, RestoreMemberRequest,
    ReviewApplicationRequest, RoleChangeResponse, SubmitApplicationRequest,
};

/// Shared state for club handlers
#[derive(Clone)]
pub struct ClubAppState<R>
where
    R: ClubRepository,
{
    pub repo: Arc<R>,
    pub gate: Arc<dyn RoleGate>,
    pub config: Arc<ClubConfig>,
}

impl<R> ClubAppState<R>
where
    R: ClubRepository,
{
    fn require_admin(&self, role: &AssertedRole) -> ClubResult<()> {
        role.require_admin(self.gate.as_ref())?;
        Ok(())
    }
}

/// Integer id from a query string value
fn parse_id(raw: Option<&str>, name: &'static str) -> ClubResult<i32> {
    let raw = raw
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .ok_or(ClubError::MissingParameter(name))?;

    raw.parse().map_err(|_| {
        ClubError::from(AppError::bad_request(format!("{} must be an integer", name)))
    })
}

// ============================================================================
// Applications
// ============================================================================

/// POST /api/applications
pub async fn submit_application<R>(
    State(state): State<ClubAppState<R>>,
    Json(req): Json<SubmitApplicationRequest>,
) -> ClubResult<Json<CreatedResponse>>
where
    R: ClubRepository,
{
    let use_case = ApplicationsUseCase::new(state.repo.clone());

    let input = SubmitApplicationInput {
        full_name: req.full_name,
        email: req.email,
        phone: req.phone,
        message: req.message,
    };

    let id = use_case.submit(input).await?;

    Ok(Json(CreatedResponse::new(id.value())))
}

/// GET /api/applications
pub async fn list_applications<R>(
    State(state): State<ClubAppState<R>>,
    role: AssertedRole,
) -> ClubResult<Json<Vec<ApplicationResponse>>>
where
    R: ClubRepository,
{
    state.require_admin(&role)?;

    let use_case = ApplicationsUseCase::new(state.repo.clone());
    let applications = use_case.list().await?;

    Ok(Json(applications.into_iter().map(Into::into).collect()))
}

/// PUT /api/applications
pub async fn review_application<R>(
    State(state): State<ClubAppState<R>>,
    role: AssertedRole,
    Json(body): Json<Value>,
) -> ClubResult<Json<SuccessResponse>>
where
    R: ClubRepository,
{
    state.require_admin(&role)?;

    let req: ReviewApplicationRequest = serde_json::from_value(body)?;

    let use_case = ApplicationsUseCase::new(state.repo.clone());
    use_case.review(ApplicationId::new(req.id), &req.status).await?;

    Ok(Json(SuccessResponse { success: true }))
}

// ============================================================================
// Attendance
// ============================================================================

/// GET /api/attendance?date=YYYY-MM-DD
pub async fn attendance_sheet<R>(
    State(state): State<ClubAppState<R>>,
    Query(query): Query<AttendanceQuery>,
) -> ClubResult<Json<AttendanceSheetResponse>>
where
    R: ClubRepository,
{
    let use_case = AttendanceUseCase::new(state.repo.clone());
    let sheet = use_case.sheet(query.date.as_deref()).await?;

    Ok(Json(AttendanceSheetResponse::from(sheet)))
}

/// POST /api/attendance
pub async fn mark_attendance<R>(
    State(state): State<ClubAppState<R>>,
    Json(req): Json<MarkAttendanceRequest>,
) -> ClubResult<Json<SuccessResponse>>
where
    R: ClubRepository,
{
    let use_case = AttendanceUseCase::new(state.repo.clone());

    let input = MarkAttendanceInput {
        member_id: MemberId::new(req.user_id),
        date: req.date,
        present: req.present,
        notes: req.notes,
    };

    use_case.mark(input).await?;

    Ok(Json(SuccessResponse { success: true }))
}

// ============================================================================
// Members
// ============================================================================

/// GET /api/members
///
/// - `?history=true`: role change log
/// - `?grades=true[&user_id=N]`: grades, open to anyone when `user_id` is given
/// - `?show_deleted=true`: removed members
/// - otherwise active members
pub async fn list_members<R>(
    State(state): State<ClubAppState<R>>,
    role: AssertedRole,
    Query(query): Query<MembersQuery>,
) -> ClubResult<Response>
where
    R: ClubRepository,
{
    let history = MembersQuery::flag(&query.history);
    let grades = !history && MembersQuery::flag(&query.grades);

    // Only one member's grades are public
    if !(grades && query.user_id.is_some()) {
        state.require_admin(&role)?;
    }

    if history {
        let use_case = MembersUseCase::new(state.repo.clone());
        let history: Vec<RoleChangeResponse> = use_case
            .role_history()
            .await?
            .into_iter()
            .map(Into::into)
            .collect();
        return Ok(Json(history).into_response());
    }

    if grades {
        let member = match query.user_id.as_deref() {
            Some(raw) => Some(MemberId::new(parse_id(Some(raw), "user_id")?)),
            None => None,
        };

        let use_case = GradesUseCase::new(state.repo.clone(), state.repo.clone());
        let grades: Vec<GradeResponse> = use_case
            .list(member)
            .await?
            .into_iter()
            .map(Into::into)
            .collect();
        return Ok(Json(grades).into_response());
    }

    let use_case = MembersUseCase::new(state.repo.clone());
    let members = if MembersQuery::flag(&query.show_deleted) {
        use_case.list_removed().await?
    } else {
        use_case.list_active().await?
    };

    let members: Vec<MemberResponse> = members.into_iter().map(Into::into).collect();
    Ok(Json(members).into_response())
}

/// POST /api/members
///
/// Dispatches on the `action` field: `restore_user` or `add_grade`.
pub async fn member_action<R>(
    State(state): State<ClubAppState<R>>,
    role: AssertedRole,
    ActingMember(acting): ActingMember,
    Json(body): Json<Value>,
) -> ClubResult<Response>
where
    R: ClubRepository,
{
    state.require_admin(&role)?;

    let action = body
        .get("action")
        .and_then(Value::as_str)
        .ok_or(ClubError::MissingParameter("action"))?
        .to_string();

    match action.as_str() {
        "restore_user" => {
            let req: RestoreMemberRequest = serde_json::from_value(body)?;

            let use_case = MembersUseCase::new(state.repo.clone());
            use_case.restore(MemberId::new(req.user_id)).await?;

            Ok(Json(SuccessResponse { success: true }).into_response())
        }
        "add_grade" => {
            let req: AddGradeRequest = serde_json::from_value(body)?;

            let use_case = GradesUseCase::new(state.repo.clone(), state.repo.clone());
            let input = AddGradeInput {
                member_id: MemberId::new(req.user_id),
                category: req.category,
                score: req.score,
                comment: req.comment,
                graded_by: acting,
            };
            let id = use_case.add(input).await?;

            Ok(Json(CreatedResponse::new(id.value())).into_response())
        }
        _ => Err(ClubError::UnknownAction(action)),
    }
}

/// PUT /api/members
pub async fn change_member_role<R>(
    State(state): State<ClubAppState<R>>,
    role: AssertedRole,
    Json(body): Json<Value>,
) -> ClubResult<Json<SuccessResponse>>
where
    R: ClubRepository,
{
    state.require_admin(&role)?;

    let req: ChangeRoleRequest = serde_json::from_value(body)?;

    let use_case = MembersUseCase::new(state.repo.clone());
    let input = ChangeRoleInput {
        member_id: MemberId::new(req.id),
        role: req.role,
        admin_id: req.admin_id.map(MemberId::new),
        reason: req.reason,
    };

    use_case.change_role(input).await?;

    Ok(Json(SuccessResponse { success: true }))
}

/// DELETE /api/members?id=N
pub async fn remove_member<R>(
    State(state): State<ClubAppState<R>>,
    role: AssertedRole,
    Query(query): Query<MembersQuery>,
) -> ClubResult<Json<SuccessResponse>>
where
    R: ClubRepository,
{
    state.require_admin(&role)?;

    let id = parse_id(query.id.as_deref(), "id")?;

    let use_case = MembersUseCase::new(state.repo.clone());
    use_case.remove(MemberId::new(id)).await?;

    Ok(Json(SuccessResponse { success: true }))
}

// ============================================================================
// News
// ============================================================================

/// GET /api/news
pub async fn news_feed<R>(
    State(state): State<ClubAppState<R>>,
) -> ClubResult<Json<Vec<NewsResponse>>>
where
    R: ClubRepository,
{
    let use_case = NewsUseCase::new(state.repo.clone(), state.config.clone());
    let articles = use_case.feed().await?;

    Ok(Json(articles.into_iter().map(Into::into).collect()))
}

/// POST /api/news
pub async fn publish_news<R>(
    State(state): State<ClubAppState<R>>,
    ActingMember(author): ActingMember,
    Json(req): Json<PublishNewsRequest>,
) -> ClubResult<Json<CreatedResponse>>
where
    R: ClubRepository,
{
    let use_case = NewsUseCase::new(state.repo.clone(), state.config.clone());

    let input = PublishArticleInput {
        title: req.title,
        content: req.content,
        author_id: author,
        image_url: req.image_url,
        video_url: req.video_url,
    };

    let id = use_case.publish(input).await?;

    Ok(Json(CreatedResponse::new(id.value())))
}
