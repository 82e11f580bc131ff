//! Use case and router tests for the club crate, backed by an in-memory store

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use auth::models::member_role::MemberRole;
use chrono::{NaiveDate, Utc};
use kernel::id::{ApplicationId, GradeId, MemberId, NewsId, RoleChangeId};

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

#[derive(Default)]
struct Store {
    next_id: i32,
    members: Vec<Member>,
    applications: Vec<MembershipApplication>,
    marks: HashMap<(MemberId, NaiveDate), AttendanceMark>,
    history: Vec<RoleChange>,
    grades: Vec<Grade>,
    news: Vec<NewsArticle>,
    revoked: Vec<MemberId>,
    /// Member promoted to admin right after the next read of it
    promote_after_read: Option<MemberId>,
}

impl Store {
    fn next_id(&mut self) -> i32 {
        self.next_id += 1;
        self.next_id
    }

    fn name_of(&self, id: MemberId) -> Option<String> {
        self.members
            .iter()
            .find(|m| m.id == id)
            .map(|m| m.full_name.clone())
    }
}

#[derive(Clone, Default)]
struct InMemoryClubRepository {
    store: Arc<Mutex<Store>>,
}

impl InMemoryClubRepository {
    fn seed_member(&self, full_name: &str, role: MemberRole) -> MemberId {
        let mut store = self.store.lock().unwrap();
        let id = MemberId::new(store.next_id());
        store.members.push(Member {
            id,
            email: Some(format!("{}@club.org", full_name.to_lowercase())),
            full_name: full_name.to_string(),
            role,
            created_at: Utc::now(),
            deleted_at: None,
        });
        id
    }

    fn role_of(&self, id: MemberId) -> Option<MemberRole> {
        let store = self.store.lock().unwrap();
        store.members.iter().find(|m| m.id == id).map(|m| m.role)
    }

    fn history_len(&self) -> usize {
        self.store.lock().unwrap().history.len()
    }

    fn revoked(&self) -> Vec<MemberId> {
        self.store.lock().unwrap().revoked.clone()
    }

    fn promote_after_next_read(&self, id: MemberId) {
        self.store.lock().unwrap().promote_after_read = Some(id);
    }
}

impl ApplicationRepository for InMemoryClubRepository {
    async fn submit(&self, application: &NewApplication) -> ClubResult<ApplicationId> {
        let mut store = self.store.lock().unwrap();
        let id = ApplicationId::new(store.next_id());
        store.applications.push(MembershipApplication {
            id,
            full_name: application.full_name.as_str().to_string(),
            email: application.email.as_str().to_string(),
            phone: application.phone.clone(),
            message: application.message.clone(),
            status: ApplicationStatus::Pending,
            created_at: Utc::now(),
        });
        Ok(id)
    }

    async fn list_applications(&self) -> ClubResult<Vec<MembershipApplication>> {
        let store = self.store.lock().unwrap();
        Ok(store.applications.iter().rev().cloned().collect())
    }

    async fn set_status(&self, id: ApplicationId, status: ApplicationStatus) -> ClubResult<bool> {
        let mut store = self.store.lock().unwrap();
        match store.applications.iter_mut().find(|a| a.id == id) {
            Some(application) => {
                application.status = status;
                Ok(true)
            }
            None => Ok(false),
        }
    }
}

impl AttendanceRepository for InMemoryClubRepository {
    async fn sheet(&self, date: NaiveDate) -> ClubResult<Vec<AttendanceEntry>> {
        let store = self.store.lock().unwrap();
        let mut entries: Vec<AttendanceEntry> = store
            .members
            .iter()
            .filter(|m| m.role == MemberRole::Member && !m.is_removed())
            .map(|m| {
                let mark = store.marks.get(&(m.id, date));
                AttendanceEntry {
                    member_id: m.id,
                    full_name: m.full_name.clone(),
                    email: m.email.clone(),
                    present: mark.is_some_and(|mark| mark.present),
                    notes: mark.map(|mark| mark.notes.clone()),
                }
            })
            .collect();
        entries.sort_by(|a, b| a.full_name.cmp(&b.full_name));
        Ok(entries)
    }

    async fn upsert_mark(&self, mark: &AttendanceMark) -> ClubResult<()> {
        let mut store = self.store.lock().unwrap();
        if !store.members.iter().any(|m| m.id == mark.member_id) {
            return Err(ClubError::MemberNotFound);
        }
        store
            .marks
            .insert((mark.member_id, mark.date), mark.clone());
        Ok(())
    }
}

impl MemberRepository for InMemoryClubRepository {
    async fn list_active(&self) -> ClubResult<Vec<Member>> {
        let store = self.store.lock().unwrap();
        Ok(store
            .members
            .iter()
            .rev()
            .filter(|m| !m.is_removed())
            .cloned()
            .collect())
    }

    async fn list_removed(&self) -> ClubResult<Vec<Member>> {
        let store = self.store.lock().unwrap();
        Ok(store
            .members
            .iter()
            .rev()
            .filter(|m| m.is_removed())
            .cloned()
            .collect())
    }

    async fn find_member(&self, id: MemberId) -> ClubResult<Option<Member>> {
        let mut store = self.store.lock().unwrap();
        let found = store.members.iter().find(|m| m.id == id).cloned();
        if store.promote_after_read == Some(id) {
            store.promote_after_read = None;
            if let Some(member) = store.members.iter_mut().find(|m| m.id == id) {
                member.role = MemberRole::Admin;
            }
        }
        Ok(found)
    }

    async fn soft_delete(&self, id: MemberId) -> ClubResult<bool> {
        let mut store = self.store.lock().unwrap();
        let Some(member) = store
            .members
            .iter_mut()
            .find(|m| m.id == id && !m.is_removed() && m.role != MemberRole::Admin)
        else {
            return Ok(false);
        };
        member.deleted_at = Some(Utc::now());
        store.revoked.push(id);
        Ok(true)
    }

    async fn restore(&self, id: MemberId) -> ClubResult<bool> {
        let mut store = self.store.lock().unwrap();
        match store.members.iter_mut().find(|m| m.id == id) {
            Some(member) => {
                member.deleted_at = None;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn change_role(
        &self,
        request: &RoleChangeRequest,
    ) -> ClubResult<Option<RoleChangeOutcome>> {
        let mut store = self.store.lock().unwrap();
        let admin_name = request.changed_by.and_then(|id| store.name_of(id));
        let Some(member) = store
            .members
            .iter_mut()
            .find(|m| m.id == request.member_id)
        else {
            return Ok(None);
        };

        let from = member.role;
        if from == request.new_role {
            return Ok(Some(RoleChangeOutcome::Unchanged));
        }
        member.role = request.new_role;

        let change = RoleChange {
            id: RoleChangeId::new(0),
            member_id: member.id,
            member_name: member.full_name.clone(),
            member_email: member.email.clone(),
            old_role: from.code().to_string(),
            new_role: request.new_role.code().to_string(),
            changed_by: request.changed_by,
            admin_name,
            changed_at: Utc::now(),
            reason: request.reason.clone(),
        };
        let id = RoleChangeId::new(store.next_id());
        store.history.push(RoleChange { id, ..change });

        Ok(Some(RoleChangeOutcome::Changed {
            from,
            to: request.new_role,
        }))
    }

    async fn role_history(&self) -> ClubResult<Vec<RoleChange>> {
        let store = self.store.lock().unwrap();
        Ok(store.history.iter().rev().cloned().collect())
    }
}

impl GradeRepository for InMemoryClubRepository {
    async fn add_grade(&self, grade: &NewGrade) -> ClubResult<GradeId> {
        let mut store = self.store.lock().unwrap();
        let member_name = store
            .name_of(grade.member_id)
            .ok_or(ClubError::MemberNotFound)?;
        let graded_by_name = grade.graded_by.and_then(|id| store.name_of(id));
        let id = GradeId::new(store.next_id());
        store.grades.push(Grade {
            id,
            member_id: grade.member_id,
            member_name,
            category: grade.category.as_str().to_string(),
            score: grade.score.value(),
            comment: grade.comment.clone(),
            graded_by: grade.graded_by,
            graded_by_name,
            graded_at: Utc::now(),
        });
        Ok(id)
    }

    async fn list_grades(&self, member: Option<MemberId>) -> ClubResult<Vec<Grade>> {
        let store = self.store.lock().unwrap();
        Ok(store
            .grades
            .iter()
            .rev()
            .filter(|g| member.is_none_or(|id| g.member_id == id))
            .cloned()
            .collect())
    }
}

impl NewsRepository for InMemoryClubRepository {
    async fn latest(&self, limit: i64) -> ClubResult<Vec<NewsArticle>> {
        let store = self.store.lock().unwrap();
        Ok(store
            .news
            .iter()
            .rev()
            .take(usize::try_from(limit).unwrap_or(0))
            .cloned()
            .collect())
    }

    async fn publish(&self, article: &NewArticle) -> ClubResult<NewsId> {
        let mut store = self.store.lock().unwrap();
        let author_name = article.author_id.and_then(|id| store.name_of(id));
        let id = NewsId::new(store.next_id());
        store.news.push(NewsArticle {
            id,
            title: article.title.clone(),
            content: article.content.clone(),
            author_id: article.author_id,
            author_name,
            image_url: article.image_url.clone(),
            video_url: article.video_url.clone(),
            created_at: Utc::now(),
        });
        Ok(id)
    }
}

mod use_case_tests {
    use super::*;
    use crate::application::{
        AddGradeInput, ApplicationsUseCase, AttendanceUseCase, ChangeRoleInput, ClubConfig,
        GradesUseCase, MarkAttendanceInput, MembersUseCase, NewsUseCase, PublishArticleInput,
        SubmitApplicationInput,
    };
    use axum::http::StatusCode;

    fn application(email: &str) -> SubmitApplicationInput {
        SubmitApplicationInput {
            full_name: "Anna Petrova".to_string(),
            email: email.to_string(),
            phone: "+7 900 123-45-67".to_string(),
            message: "I would like to join".to_string(),
        }
    }

    #[tokio::test]
    async fn test_submit_and_review_application() {
        let repo = Arc::new(InMemoryClubRepository::default());
        let use_case = ApplicationsUseCase::new(repo.clone());

        let id = use_case.submit(application("Anna@Mail.ru")).await.unwrap();

        let listed = use_case.list().await.unwrap();
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].email, "anna@mail.ru");
        assert_eq!(listed[0].status, ApplicationStatus::Pending);

        use_case.review(id, "approved").await.unwrap();
        let listed = use_case.list().await.unwrap();
        assert_eq!(listed[0].status, ApplicationStatus::Approved);
    }

    #[tokio::test]
    async fn test_review_rejects_unknown_id_and_status() {
        let repo = Arc::new(InMemoryClubRepository::default());
        let use_case = ApplicationsUseCase::new(repo.clone());
        let id = use_case.submit(application("anna@mail.ru")).await.unwrap();

        let err = use_case
            .review(ApplicationId::new(999), "approved")
            .await
            .unwrap_err();
        assert!(matches!(err, ClubError::ApplicationNotFound));

        let err = use_case.review(id, "maybe").await.unwrap_err();
        assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_submit_validates_email() {
        let repo = Arc::new(InMemoryClubRepository::default());
        let use_case = ApplicationsUseCase::new(repo);

        let err = use_case.submit(application("not-an-email")).await.unwrap_err();
        assert!(matches!(err, ClubError::Validation(_)));
    }

    #[tokio::test]
    async fn test_attendance_sheet_lists_active_members_by_name() {
        let repo = Arc::new(InMemoryClubRepository::default());
        let boris = repo.seed_member("Boris", MemberRole::Member);
        let alla = repo.seed_member("Alla", MemberRole::Member);
        repo.seed_member("Coach", MemberRole::Admin);
        let gone = repo.seed_member("Gone", MemberRole::Member);
        MembersUseCase::new(repo.clone()).remove(gone).await.unwrap();

        let use_case = AttendanceUseCase::new(repo.clone());
        let sheet = use_case.sheet(None).await.unwrap();

        assert_eq!(sheet.date, Utc::now().date_naive());
        let ids: Vec<MemberId> = sheet.entries.iter().map(|e| e.member_id).collect();
        assert_eq!(ids, vec![alla, boris]);
        assert!(sheet.entries.iter().all(|e| !e.present && e.notes.is_none()));
    }

    #[tokio::test]
    async fn test_mark_attendance_upserts() {
        let repo = Arc::new(InMemoryClubRepository::default());
        let member = repo.seed_member("Boris", MemberRole::Member);
        let use_case = AttendanceUseCase::new(repo.clone());

        let mark = |present: Option<bool>, notes: Option<&str>| MarkAttendanceInput {
            member_id: member,
            date: Some("2024-09-01".to_string()),
            present,
            notes: notes.map(str::to_string),
        };

        use_case.mark(mark(Some(true), Some("late"))).await.unwrap();
        let sheet = use_case.sheet(Some("2024-09-01")).await.unwrap();
        assert!(sheet.entries[0].present);
        assert_eq!(sheet.entries[0].notes.as_deref(), Some("late"));

        use_case.mark(mark(None, None)).await.unwrap();
        let sheet = use_case.sheet(Some("2024-09-01")).await.unwrap();
        assert!(!sheet.entries[0].present);
        assert_eq!(sheet.entries[0].notes.as_deref(), Some(""));

        let other_day = use_case.sheet(Some("2024-09-02")).await.unwrap();
        assert!(!other_day.entries[0].present);
    }

    #[tokio::test]
    async fn test_attendance_rejects_bad_date() {
        let repo = Arc::new(InMemoryClubRepository::default());
        let use_case = AttendanceUseCase::new(repo);

        let err = use_case.sheet(Some("01/09/2024")).await.unwrap_err();
        assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_remove_and_restore_member() {
        let repo = Arc::new(InMemoryClubRepository::default());
        let member = repo.seed_member("Boris", MemberRole::Member);
        let use_case = MembersUseCase::new(repo.clone());

        use_case.remove(member).await.unwrap();
        assert_eq!(repo.revoked(), vec![member]);
        assert!(use_case.list_active().await.unwrap().is_empty());
        assert_eq!(use_case.list_removed().await.unwrap()[0].id, member);

        let err = use_case.remove(member).await.unwrap_err();
        assert!(matches!(err, ClubError::MemberNotFound));

        use_case.restore(member).await.unwrap();
        assert_eq!(use_case.list_active().await.unwrap().len(), 1);

        let err = use_case.restore(MemberId::new(999)).await.unwrap_err();
        assert!(matches!(err, ClubError::MemberNotFound));
    }

    #[tokio::test]
    async fn test_cannot_remove_admin() {
        let repo = Arc::new(InMemoryClubRepository::default());
        let admin = repo.seed_member("Coach", MemberRole::Admin);
        let use_case = MembersUseCase::new(repo.clone());

        let err = use_case.remove(admin).await.unwrap_err();
        assert!(matches!(err, ClubError::CannotRemoveAdmin));
        assert!(repo.revoked().is_empty());
    }

    #[tokio::test]
    async fn test_member_promoted_during_removal_is_kept() {
        let repo = Arc::new(InMemoryClubRepository::default());
        let member = repo.seed_member("Boris", MemberRole::Member);
        let use_case = MembersUseCase::new(repo.clone());

        repo.promote_after_next_read(member);

        let err = use_case.remove(member).await.unwrap_err();
        assert!(matches!(err, ClubError::CannotRemoveAdmin));
        assert!(repo.revoked().is_empty());
        assert_eq!(use_case.list_active().await.unwrap().len(), 1);
        assert_eq!(repo.role_of(member), Some(MemberRole::Admin));
    }

    #[tokio::test]
    async fn test_change_role_records_history_once() {
        let repo = Arc::new(InMemoryClubRepository::default());
        let admin = repo.seed_member("Coach", MemberRole::Admin);
        let member = repo.seed_member("Boris", MemberRole::Member);
        let use_case = MembersUseCase::new(repo.clone());

        let input = |role: &str| ChangeRoleInput {
            member_id: member,
            role: role.to_string(),
            admin_id: Some(admin),
            reason: Some("Team captain".to_string()),
        };

        let outcome = use_case.change_role(input("member")).await.unwrap();
        assert_eq!(outcome, RoleChangeOutcome::Unchanged);
        assert_eq!(repo.history_len(), 0);

        let outcome = use_case.change_role(input("admin")).await.unwrap();
        assert_eq!(
            outcome,
            RoleChangeOutcome::Changed {
                from: MemberRole::Member,
                to: MemberRole::Admin
            }
        );
        assert_eq!(repo.role_of(member), Some(MemberRole::Admin));

        let history = use_case.role_history().await.unwrap();
        assert_eq!(history.len(), 1);
        assert_eq!(history[0].old_role, "member");
        assert_eq!(history[0].new_role, "admin");
        assert_eq!(history[0].admin_name.as_deref(), Some("Coach"));
        assert_eq!(history[0].reason.as_deref(), Some("Team captain"));
    }

    #[tokio::test]
    async fn test_change_role_errors() {
        let repo = Arc::new(InMemoryClubRepository::default());
        let member = repo.seed_member("Boris", MemberRole::Member);
        let use_case = MembersUseCase::new(repo.clone());

        let err = use_case
            .change_role(ChangeRoleInput {
                member_id: MemberId::new(999),
                role: "admin".to_string(),
                admin_id: None,
                reason: None,
            })
            .await
            .unwrap_err();
        assert!(matches!(err, ClubError::MemberNotFound));

        let err = use_case
            .change_role(ChangeRoleInput {
                member_id: member,
                role: "captain".to_string(),
                admin_id: None,
                reason: None,
            })
            .await
            .unwrap_err();
        assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_grades() {
        let repo = Arc::new(InMemoryClubRepository::default());
        let coach = repo.seed_member("Coach", MemberRole::Admin);
        let boris = repo.seed_member("Boris", MemberRole::Member);
        let alla = repo.seed_member("Alla", MemberRole::Member);
        let use_case = GradesUseCase::new(repo.clone(), repo.clone());

        let grade = |member_id: MemberId, score: i32| AddGradeInput {
            member_id,
            category: "technique".to_string(),
            score,
            comment: Some("Solid".to_string()),
            graded_by: Some(coach),
        };

        use_case.add(grade(boris, 80)).await.unwrap();
        use_case.add(grade(alla, 95)).await.unwrap();

        let all = use_case.list(None).await.unwrap();
        assert_eq!(all.len(), 2);
        assert_eq!(all[0].member_name, "Alla");

        let boris_grades = use_case.list(Some(boris)).await.unwrap();
        assert_eq!(boris_grades.len(), 1);
        assert_eq!(boris_grades[0].score, 80);
        assert_eq!(boris_grades[0].graded_by_name.as_deref(), Some("Coach"));

        let err = use_case.add(grade(boris, 101)).await.unwrap_err();
        assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);

        let err = use_case.add(grade(MemberId::new(999), 50)).await.unwrap_err();
        assert!(matches!(err, ClubError::MemberNotFound));
    }

    #[tokio::test]
    async fn test_news_feed_is_limited_and_newest_first() {
        let repo = Arc::new(InMemoryClubRepository::default());
        let author = repo.seed_member("Coach", MemberRole::Admin);
        let config = Arc::new(ClubConfig::default().with_news_feed_limit(2));
        let use_case = NewsUseCase::new(repo.clone(), config);

        for title in ["First", "Second", "Third"] {
            use_case
                .publish(PublishArticleInput {
                    title: title.to_string(),
                    content: "Match report".to_string(),
                    author_id: Some(author),
                    image_url: None,
                    video_url: None,
                })
                .await
                .unwrap();
        }

        let feed = use_case.feed().await.unwrap();
        let titles: Vec<&str> = feed.iter().map(|a| a.title.as_str()).collect();
        assert_eq!(titles, vec!["Third", "Second"]);
        assert_eq!(feed[0].author_name.as_deref(), Some("Coach"));
    }

    #[tokio::test]
    async fn test_publish_requires_title() {
        let repo = Arc::new(InMemoryClubRepository::default());
        let use_case = NewsUseCase::new(repo, Arc::new(ClubConfig::default()));

        let err = use_case
            .publish(PublishArticleInput {
                title: "   ".to_string(),
                content: "Body".to_string(),
                author_id: None,
                image_url: None,
                video_url: None,
            })
            .await
            .unwrap_err();
        assert!(matches!(err, ClubError::Validation(_)));
    }
}

mod router_tests {
    use super::*;
    use crate::application::ClubConfig;
    use crate::presentation::router::club_router_generic;
    use auth::HeaderRoleGate;
    use axum::Router;
    use axum::body::{Body, to_bytes};
    use axum::http::{Request, StatusCode};
    use serde_json::{Value, json};
    use tower::ServiceExt;

    fn build_app(repo: InMemoryClubRepository) -> Router {
        club_router_generic(repo, Arc::new(HeaderRoleGate), ClubConfig::default())
    }

    async fn send(app: &Router, request: Request<Body>) -> (StatusCode, Value) {
        let response = app.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let body = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap_or(Value::Null)
        };
        (status, body)
    }

    fn json_request(method: &str, uri: &str, role: Option<&str>, body: Value) -> Request<Body> {
        let mut builder = Request::builder()
            .method(method)
            .uri(uri)
            .header("content-type", "application/json");
        if let Some(role) = role {
            builder = builder.header("X-User-Role", role);
        }
        builder.body(Body::from(body.to_string())).unwrap()
    }

    fn get(uri: &str, role: Option<&str>) -> Request<Body> {
        let mut builder = Request::get(uri);
        if let Some(role) = role {
            builder = builder.header("X-User-Role", role);
        }
        builder.body(Body::empty()).unwrap()
    }

    fn delete(uri: &str, role: Option<&str>) -> Request<Body> {
        let mut builder = Request::delete(uri);
        if let Some(role) = role {
            builder = builder.header("X-User-Role", role);
        }
        builder.body(Body::empty()).unwrap()
    }

    #[tokio::test]
    async fn test_application_flow() {
        let app = build_app(InMemoryClubRepository::default());

        let (status, body) = send(
            &app,
            json_request(
                "POST",
                "/applications",
                None,
                json!({"full_name": "Anna", "email": "anna@mail.ru", "phone": "", "message": "Hi"}),
            ),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["success"], true);
        let id = body["id"].as_i64().unwrap();

        let (status, body) = send(&app, get("/applications", None)).await;
        assert_eq!(status, StatusCode::FORBIDDEN);
        assert_eq!(body["error"], "Access denied");

        let (status, body) = send(&app, get("/applications", Some("admin"))).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body[0]["status"], "pending");

        let (status, _) = send(
            &app,
            json_request(
                "PUT",
                "/applications",
                Some("admin"),
                json!({"id": id, "status": "rejected"}),
            ),
        )
        .await;
        assert_eq!(status, StatusCode::OK);

        let (status, body) = send(
            &app,
            json_request(
                "PUT",
                "/applications",
                Some("admin"),
                json!({"id": 999, "status": "approved"}),
            ),
        )
        .await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["error"], "Application not found");
    }

    #[tokio::test]
    async fn test_gate_runs_before_body_decoding() {
        let app = build_app(InMemoryClubRepository::default());

        for (method, uri) in [("PUT", "/applications"), ("PUT", "/members"), ("POST", "/members")] {
            let (status, _) =
                send(&app, json_request(method, uri, Some("member"), json!({}))).await;
            assert_eq!(status, StatusCode::FORBIDDEN, "{method} {uri}");
        }
    }

    #[tokio::test]
    async fn test_members_listing_modes() {
        let repo = InMemoryClubRepository::default();
        repo.seed_member("Coach", MemberRole::Admin);
        let boris = repo.seed_member("Boris", MemberRole::Member);
        let app = build_app(repo);

        let (status, body) = send(&app, get("/members", Some("admin"))).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body.as_array().unwrap().len(), 2);
        assert_eq!(body[0]["full_name"], "Boris");
        assert!(body[0].get("deleted_at").is_none());

        let (status, _) = send(
            &app,
            delete(&format!("/members?id={}", boris.value()), Some("admin")),
        )
        .await;
        assert_eq!(status, StatusCode::OK);

        let (_, body) = send(&app, get("/members?show_deleted=true", Some("admin"))).await;
        assert_eq!(body[0]["id"], boris.value());
        assert!(body[0]["deleted_at"].is_string());

        let (status, _) = send(
            &app,
            json_request(
                "POST",
                "/members",
                Some("admin"),
                json!({"action": "restore_user", "user_id": boris.value()}),
            ),
        )
        .await;
        assert_eq!(status, StatusCode::OK);

        let (_, body) = send(&app, get("/members?show_deleted=true", Some("admin"))).await;
        assert_eq!(body, json!([]));
    }

    #[tokio::test]
    async fn test_members_gate_with_combined_flags() {
        let repo = InMemoryClubRepository::default();
        let coach = repo.seed_member("Coach", MemberRole::Admin);
        let boris = repo.seed_member("Boris", MemberRole::Member);
        let gone = repo.seed_member("Gone", MemberRole::Member);
        let app = build_app(repo);

        let (status, _) = send(
            &app,
            json_request(
                "PUT",
                "/members",
                Some("admin"),
                json!({"id": boris.value(), "role": "admin", "admin_id": coach.value()}),
            ),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        let (status, _) = send(
            &app,
            delete(&format!("/members?id={}", gone.value()), Some("admin")),
        )
        .await;
        assert_eq!(status, StatusCode::OK);

        // The role change log stays admin-only whatever else is asked for
        for uri in [
            format!("/members?history=true&grades=true&user_id={}", boris.value()),
            format!("/members?grades=true&history=true&user_id={}", boris.value()),
            "/members?history=true&show_deleted=true".to_string(),
            "/members?history=true".to_string(),
        ] {
            let (status, body) = send(&app, get(&uri, None)).await;
            assert_eq!(status, StatusCode::FORBIDDEN, "{uri}");
            assert_eq!(body["error"], "Access denied");
        }

        for uri in [
            "/members?show_deleted=true".to_string(),
            "/members?show_deleted=true&user_id=2".to_string(),
            "/members?grades=false&user_id=2".to_string(),
        ] {
            let (status, _) = send(&app, get(&uri, None)).await;
            assert_eq!(status, StatusCode::FORBIDDEN, "{uri}");
        }

        // Grades win over show_deleted, so only that member's grades come back
        let uri = format!("/members?show_deleted=true&grades=true&user_id={}", boris.value());
        let (status, body) = send(&app, get(&uri, None)).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!([]));

        let (status, body) = send(
            &app,
            get("/members?history=true&grades=true&user_id=2", Some("admin")),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body[0]["new_role"], "admin");
    }

    #[tokio::test]
    async fn test_remove_member_errors() {
        let repo = InMemoryClubRepository::default();
        let admin = repo.seed_member("Coach", MemberRole::Admin);
        let app = build_app(repo);

        let (status, body) = send(&app, delete("/members", Some("admin"))).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "id is required");

        let (status, _) = send(&app, delete("/members?id=abc", Some("admin"))).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);

        let (status, body) = send(
            &app,
            delete(&format!("/members?id={}", admin.value()), Some("admin")),
        )
        .await;
        assert_eq!(status, StatusCode::FORBIDDEN);
        assert_eq!(body["error"], "Cannot remove admin");

        let (status, _) = send(&app, delete("/members?id=999", Some("admin"))).await;
        assert_eq!(status, StatusCode::NOT_FOUND);

        let (status, _) = send(&app, delete("/members?id=1", None)).await;
        assert_eq!(status, StatusCode::FORBIDDEN);
    }

    #[tokio::test]
    async fn test_grades_via_members_endpoint() {
        let repo = InMemoryClubRepository::default();
        let coach = repo.seed_member("Coach", MemberRole::Admin);
        let boris = repo.seed_member("Boris", MemberRole::Member);
        let app = build_app(repo);

        let request = Request::post("/members")
            .header("content-type", "application/json")
            .header("X-User-Role", "admin")
            .header("X-User-Id", coach.value().to_string())
            .body(Body::from(
                json!({
                    "action": "add_grade",
                    "user_id": boris.value(),
                    "category": "stamina",
                    "score": 70
                })
                .to_string(),
            ))
            .unwrap();
        let (status, body) = send(&app, request).await;
        assert_eq!(status, StatusCode::OK);
        assert!(body["id"].is_number());

        let uri = format!("/members?grades=true&user_id={}", boris.value());
        let (status, body) = send(&app, get(&uri, None)).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body[0]["category"], "stamina");
        assert_eq!(body[0]["user_name"], "Boris");
        assert_eq!(body[0]["graded_by_name"], "Coach");

        let (status, _) = send(&app, get("/members?grades=true", None)).await;
        assert_eq!(status, StatusCode::FORBIDDEN);

        let (status, body) = send(&app, get("/members?grades=true", Some("admin"))).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body.as_array().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_member_action_dispatch_errors() {
        let app = build_app(InMemoryClubRepository::default());

        let (status, body) = send(
            &app,
            json_request("POST", "/members", Some("admin"), json!({"action": "promote"})),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "Unknown action: promote");

        let (status, body) = send(
            &app,
            json_request("POST", "/members", Some("admin"), json!({"user_id": 1})),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "action is required");

        let (status, _) = send(
            &app,
            json_request(
                "POST",
                "/members",
                Some("admin"),
                json!({"action": "restore_user"}),
            ),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_change_role_and_history() {
        let repo = InMemoryClubRepository::default();
        let coach = repo.seed_member("Coach", MemberRole::Admin);
        let boris = repo.seed_member("Boris", MemberRole::Member);
        let app = build_app(repo);

        let (status, body) = send(
            &app,
            json_request(
                "PUT",
                "/members",
                Some("admin"),
                json!({"id": boris.value(), "role": "admin", "admin_id": coach.value()}),
            ),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["success"], true);

        let (status, body) = send(&app, get("/members?history=true", Some("admin"))).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body[0]["user_name"], "Boris");
        assert_eq!(body[0]["old_role"], "member");
        assert_eq!(body[0]["new_role"], "admin");
        assert_eq!(body[0]["admin_name"], "Coach");

        let (status, _) = send(
            &app,
            json_request(
                "PUT",
                "/members",
                Some("admin"),
                json!({"id": 999, "role": "admin"}),
            ),
        )
        .await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_attendance_endpoints() {
        let repo = InMemoryClubRepository::default();
        let boris = repo.seed_member("Boris", MemberRole::Member);
        let app = build_app(repo);

        let (status, body) = send(&app, get("/attendance", None)).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(
            body["date"],
            Utc::now().date_naive().format("%Y-%m-%d").to_string()
        );
        assert_eq!(body["attendance"][0]["present"], false);
        assert_eq!(body["attendance"][0]["notes"], Value::Null);

        let (status, _) = send(
            &app,
            json_request(
                "POST",
                "/attendance",
                None,
                json!({"user_id": boris.value(), "date": "2024-09-01", "present": true}),
            ),
        )
        .await;
        assert_eq!(status, StatusCode::OK);

        let (_, body) = send(&app, get("/attendance?date=2024-09-01", None)).await;
        assert_eq!(body["date"], "2024-09-01");
        assert_eq!(body["attendance"][0]["present"], true);
        assert_eq!(body["attendance"][0]["notes"], "");

        let (status, body) = send(&app, get("/attendance?date=yesterday", None)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["action"], "Use the YYYY-MM-DD format");

        let (status, _) = send(
            &app,
            json_request("POST", "/attendance", None, json!({"user_id": 999})),
        )
        .await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_news_endpoints() {
        let repo = InMemoryClubRepository::default();
        let coach = repo.seed_member("Coach", MemberRole::Admin);
        let app = build_app(repo);

        let request = Request::post("/news")
            .header("content-type", "application/json")
            .header("X-User-Id", coach.value().to_string())
            .body(Body::from(
                json!({"title": "Cup win", "content": "We won the regional cup"}).to_string(),
            ))
            .unwrap();
        let (status, body) = send(&app, request).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["success"], true);

        let (status, body) = send(&app, get("/news", None)).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body[0]["title"], "Cup win");
        assert_eq!(body[0]["author_name"], "Coach");
        assert_eq!(body[0]["image_url"], Value::Null);

        let (status, _) = send(
            &app,
            json_request("POST", "/news", None, json!({"title": "", "content": "x"})),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_unrouted_method_is_405() {
        let app = build_app(InMemoryClubRepository::default());

        let request = Request::patch("/news").body(Body::empty()).unwrap();
        let (status, _) = send(&app, request).await;
        assert_eq!(status, StatusCode::METHOD_NOT_ALLOWED);
    }
}
