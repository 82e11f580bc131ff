//! Length-limited free text fields

use kernel::error::app_error::{AppError, AppResult};

/// Trimmed text that must not be empty
pub fn required(field: &'static str, raw: &str, max_chars: usize) -> AppResult<String> {
    let value = raw.trim();
    if value.is_empty() {
        return Err(AppError::bad_request(format!("{} cannot be empty", field)));
    }
    limited(field, value, max_chars)
}

/// Trimmed optional text; blank becomes `None`
pub fn optional(field: &'static str, raw: Option<&str>, max_chars: usize) -> AppResult<Option<String>> {
    match raw.map(str::trim).filter(|v| !v.is_empty()) {
        Some(value) => limited(field, value, max_chars).map(Some),
        None => Ok(None),
    }
}

/// Trimmed text, empty allowed
pub fn limited(field: &'static str, raw: &str, max_chars: usize) -> AppResult<String> {
    let value = raw.trim();
    let len = value.chars().count();
    if len > max_chars {
        return Err(AppError::bad_request(format!(
            "{} must be at most {} characters (got {})",
            field, max_chars, len
        )));
    }
    Ok(value.to_string())
}
