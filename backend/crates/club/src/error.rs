//! Club Error Types
//!
//! Club-specific error variants that integrate with the unified
//! `kernel::error::AppError` system.

use auth::AuthError;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use kernel::error::{app_error::AppError, kind::ErrorKind};
use thiserror::Error;

/// Club-specific result type alias
pub type ClubResult<T> = Result<T, ClubError>;

/// PostgreSQL foreign key violation
const FOREIGN_KEY_VIOLATION: &str = "23503";

/// Club-specific error variants
#[derive(Debug, Error)]
pub enum ClubError {
    /// Role gate rejected the caller
    #[error("Access denied")]
    AccessDenied,

    /// Admin accounts cannot be removed
    #[error("Cannot remove admin")]
    CannotRemoveAdmin,

    /// Member not found (or already removed)
    #[error("Member not found")]
    MemberNotFound,

    /// Application not found
    #[error("Application not found")]
    ApplicationNotFound,

    /// Required query or body parameter absent
    #[error("{0} is required")]
    MissingParameter(&'static str),

    /// Unsupported `action` in a members POST
    #[error("Unknown action: {0}")]
    UnknownAction(String),

    /// Request failed validation
    #[error("{0}")]
    Validation(AppError),

    /// Database error
    #[error("Database error: {0}")]
    Database(sqlx::Error),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),
}

impl ClubError {
    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        StatusCode::from_u16(self.kind().status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
    }

    /// Get the ErrorKind for this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            ClubError::AccessDenied | ClubError::CannotRemoveAdmin => ErrorKind::Forbidden,
            ClubError::MemberNotFound | ClubError::ApplicationNotFound => ErrorKind::NotFound,
            ClubError::MissingParameter(_) | ClubError::UnknownAction(_) => ErrorKind::BadRequest,
            ClubError::Validation(err) => err.kind(),
            ClubError::Database(_) | ClubError::Internal(_) => ErrorKind::InternalServerError,
        }
    }

    /// Convert to AppError
    pub fn to_app_error(&self) -> AppError {
        match self {
            ClubError::Validation(err) => {
                let app_err = AppError::new(err.kind(), err.message().to_string());
                match err.action() {
                    Some(action) => app_err.with_action(action.to_string()),
                    None => app_err,
                }
            }
            ClubError::Database(_) | ClubError::Internal(_) => {
                AppError::internal("Internal server error")
            }
            _ => AppError::new(self.kind(), self.to_string()),
        }
    }

    /// Log the error with appropriate level
    fn log(&self) {
        match self {
            ClubError::Database(e) => {
                tracing::error!(error = %e, "Club database error");
            }
            ClubError::Internal(msg) => {
                tracing::error!(message = %msg, "Club internal error");
            }
            ClubError::AccessDenied => {
                tracing::warn!("Role gate denied request");
            }
            ClubError::CannotRemoveAdmin => {
                tracing::warn!("Attempt to remove an admin account");
            }
            _ => {
                tracing::debug!(error = %self, "Club error");
            }
        }
    }
}

impl IntoResponse for ClubError {
    fn into_response(self) -> Response {
        self.log();
        self.to_app_error().into_response()
    }
}

impl From<sqlx::Error> for ClubError {
    fn from(err: sqlx::Error) -> Self {
        match &err {
            // Every foreign key in the club schema points at `users`
            sqlx::Error::Database(db_err)
                if db_err.code().as_deref() == Some(FOREIGN_KEY_VIOLATION) =>
            {
                ClubError::MemberNotFound
            }
            _ => ClubError::Database(err),
        }
    }
}

impl From<AppError> for ClubError {
    fn from(err: AppError) -> Self {
        if err.is_server_error() {
            ClubError::Internal(err.to_string())
        } else {
            ClubError::Validation(err)
        }
    }
}

impl From<serde_json::Error> for ClubError {
    fn from(err: serde_json::Error) -> Self {
        ClubError::from(AppError::from(err))
    }
}

impl From<AuthError> for ClubError {
    fn from(err: AuthError) -> Self {
        match err {
            AuthError::AccessDenied => ClubError::AccessDenied,
            AuthError::Validation(app_err) => ClubError::Validation(app_err),
            AuthError::Database(db_err) => ClubError::Database(db_err),
            other => ClubError::Internal(other.to_string()),
        }
    }
}
