//! Full Name Value Object

use kernel::error::app_error::{AppError, AppResult};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Maximum display name length in characters
pub const FULL_NAME_MAX_LENGTH: usize = 100;

/// Display name of a member or applicant
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FullName(String);

impl FullName {
    pub fn new(name: impl Into<String>) -> AppResult<Self> {
        let name = name.into().trim().to_string();

        if name.is_empty() {
            return Err(AppError::bad_request("Full name cannot be empty"));
        }

        let len = name.chars().count();
        if len > FULL_NAME_MAX_LENGTH {
            return Err(AppError::bad_request(format!(
                "Full name must be at most {} characters (got {})",
                FULL_NAME_MAX_LENGTH, len
            )));
        }

        if name.chars().any(char::is_control) {
            return Err(AppError::bad_request(
                "Full name contains invalid control characters",
            ));
        }

        Ok(Self(name))
    }

    /// Build a display name from the parts a login provider sends
    pub fn from_parts(first: &str, last: Option<&str>) -> AppResult<Self> {
        match last.map(str::trim).filter(|l| !l.is_empty()) {
            Some(last) => Self::new(format!("{} {}", first.trim(), last)),
            None => Self::new(first),
        }
    }

    pub fn from_db(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_db(self) -> String {
        self.0
    }
}

impl fmt::Display for FullName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
