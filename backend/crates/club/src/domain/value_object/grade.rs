//! Grade Value Objects

use kernel::error::app_error::{AppError, AppResult};
use serde::{Deserialize, Serialize};

pub const MIN_SCORE: i32 = 0;
pub const MAX_SCORE: i32 = 100;
pub const CATEGORY_MAX_LENGTH: usize = 64;

/// Score on the 0-100 scale used by coaches
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Score(i32);

impl Score {
    pub fn new(value: i32) -> AppResult<Self> {
        if !(MIN_SCORE..=MAX_SCORE).contains(&value) {
            return Err(AppError::bad_request(format!(
                "Score must be between {} and {} (got {})",
                MIN_SCORE, MAX_SCORE, value
            )));
        }
        Ok(Self(value))
    }

    pub fn value(&self) -> i32 {
        self.0
    }
}

/// Free-form grading category ("technique", "stamina", ...)
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GradeCategory(String);

impl GradeCategory {
    pub fn new(category: impl Into<String>) -> AppResult<Self> {
        let category = category.into().trim().to_string();
        if category.is_empty() {
            return Err(AppError::bad_request("Category cannot be empty"));
        }
        if category.chars().count() > CATEGORY_MAX_LENGTH {
            return Err(AppError::bad_request(format!(
                "Category must be at most {} characters",
                CATEGORY_MAX_LENGTH
            )));
        }
        Ok(Self(category))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}
