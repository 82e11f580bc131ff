//! Grades Use Case

use std::sync::Arc;

use kernel::id::{GradeId, MemberId};

use crate::domain::entity::grade::{Grade, NewGrade};
use crate::domain::repository::{GradeRepository, MemberRepository};
use crate::error::{ClubError, ClubResult};

/// Add grade input
pub struct AddGradeInput {
    pub member_id: MemberId,
    pub category: String,
    pub score: i32,
    pub comment: Option<String>,
    pub graded_by: Option<MemberId>,
}

/// Grades use case
pub struct GradesUseCase<G, M>
where
    G: GradeRepository,
    M: MemberRepository,
{
    grade_repo: Arc<G>,
    member_repo: Arc<M>,
}

impl<G, M> GradesUseCase<G, M>
where
    G: GradeRepository,
    M: MemberRepository,
{
    pub fn new(grade_repo: Arc<G>, member_repo: Arc<M>) -> Self {
        Self {
            grade_repo,
            member_repo,
        }
    }

    pub async fn list(&self, member: Option<MemberId>) -> ClubResult<Vec<Grade>> {
        self.grade_repo.list_grades(member).await
    }

    /// Grade an active member
    pub async fn add(&self, input: AddGradeInput) -> ClubResult<GradeId> {
        let grade = NewGrade::new(
            input.member_id,
            &input.category,
            input.score,
            input.comment.as_deref(),
            input.graded_by,
        )?;

        self.member_repo
            .find_member(grade.member_id)
            .await?
            .filter(|m| !m.is_removed())
            .ok_or(ClubError::MemberNotFound)?;

        let id = self.grade_repo.add_grade(&grade).await?;

        tracing::info!(
            grade_id = %id,
            member_id = %grade.member_id,
            score = grade.score.value(),
            "Grade added"
        );
        Ok(id)
    }
}
