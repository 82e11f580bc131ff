//! Grade Entities

use chrono::{DateTime, Utc};
use kernel::error::app_error::AppResult;
use kernel::id::{GradeId, MemberId};

use crate::domain::value_object::{
    grade::{GradeCategory, Score},
    text,
};

pub const COMMENT_MAX_LENGTH: usize = 1000;

/// Grade with member and grader names resolved
#[derive(Debug, Clone)]
pub struct Grade {
    pub id: GradeId,
    pub member_id: MemberId,
    pub member_name: String,
    pub category: String,
    pub score: i32,
    pub comment: Option<String>,
    pub graded_by: Option<MemberId>,
    pub graded_by_name: Option<String>,
    pub graded_at: DateTime<Utc>,
}

/// Validated grade ready to insert
#[derive(Debug, Clone)]
pub struct NewGrade {
    pub member_id: MemberId,
    pub category: GradeCategory,
    pub score: Score,
    pub comment: Option<String>,
    pub graded_by: Option<MemberId>,
}

impl NewGrade {
    pub fn new(
        member_id: MemberId,
        category: &str,
        score: i32,
        comment: Option<&str>,
        graded_by: Option<MemberId>,
    ) -> AppResult<Self> {
        Ok(Self {
            member_id,
            category: GradeCategory::new(category)?,
            score: Score::new(score)?,
            comment: text::optional("Comment", comment, COMMENT_MAX_LENGTH)?,
            graded_by,
        })
    }
}
