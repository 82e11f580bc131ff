//! Auth Error Types
//!
//! This module provides auth-specific error variants that integrate
//! with the unified `kernel::error::AppError` system.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use kernel::error::{app_error::AppError, kind::ErrorKind};
use thiserror::Error;

/// Auth-specific result type alias
pub type AuthResult<T> = Result<T, AuthError>;

/// Auth-specific error variants
#[derive(Debug, Error)]
pub enum AuthError {
    /// Email already registered
    #[error("Email is already registered")]
    EmailTaken,

    /// Unknown email, wrong password or removed account
    #[error("Invalid credentials")]
    InvalidCredentials,

    /// Account was removed by an admin
    #[error("Account has been removed")]
    AccountRemoved,

    /// Bot token missing from configuration
    #[error("Telegram login is not configured")]
    TelegramNotConfigured,

    /// Signature check failed
    #[error("Invalid Telegram signature")]
    TelegramSignatureInvalid,

    /// `auth_date` missing, malformed, too old or in the future
    #[error("Telegram login has expired")]
    TelegramAuthExpired,

    /// Required field absent or malformed in the Telegram payload
    #[error("Invalid Telegram payload: {0}")]
    TelegramPayloadInvalid(&'static str),

    /// Role gate rejected the caller
    #[error("Access denied")]
    AccessDenied,

    /// Request failed validation
    #[error("{0}")]
    Validation(AppError),

    /// Database error
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),
}

impl AuthError {
    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        StatusCode::from_u16(self.kind().status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
    }

    /// Get the ErrorKind for this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            AuthError::EmailTaken => ErrorKind::Conflict,
            AuthError::InvalidCredentials
            | AuthError::AccountRemoved
            | AuthError::TelegramSignatureInvalid
            | AuthError::TelegramAuthExpired => ErrorKind::Unauthorized,
            AuthError::TelegramNotConfigured => ErrorKind::ServiceUnavailable,
            AuthError::TelegramPayloadInvalid(_) => ErrorKind::BadRequest,
            AuthError::AccessDenied => ErrorKind::Forbidden,
            AuthError::Validation(err) => err.kind(),
            AuthError::Database(_) | AuthError::Internal(_) => ErrorKind::InternalServerError,
        }
    }

    /// Convert to AppError
    pub fn to_app_error(&self) -> AppError {
        match self {
            AuthError::Validation(err) => {
                let app_err = AppError::new(err.kind(), err.message().to_string());
                match err.action() {
                    Some(action) => app_err.with_action(action.to_string()),
                    None => app_err,
                }
            }
            // Storage details stay in the log
            AuthError::Database(_) | AuthError::Internal(_) => {
                AppError::internal("Internal server error")
            }
            _ => AppError::new(self.kind(), self.to_string()),
        }
    }

    /// Log the error with appropriate level
    fn log(&self) {
        match self {
            AuthError::Database(e) => {
                tracing::error!(error = %e, "Auth database error");
            }
            AuthError::Internal(msg) => {
                tracing::error!(message = %msg, "Auth internal error");
            }
            AuthError::InvalidCredentials => {
                tracing::warn!("Invalid login attempt");
            }
            AuthError::TelegramSignatureInvalid => {
                tracing::warn!("Telegram login with invalid signature");
            }
            AuthError::TelegramNotConfigured => {
                tracing::warn!("Telegram login attempted but bot token is not configured");
            }
            AuthError::AccessDenied => {
                tracing::warn!("Role gate denied request");
            }
            _ => {
                tracing::debug!(error = %self, "Auth error");
            }
        }
    }
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        self.log();
        self.to_app_error().into_response()
    }
}

impl From<AppError> for AuthError {
    fn from(err: AppError) -> Self {
        if err.is_server_error() {
            AuthError::Internal(err.to_string())
        } else {
            AuthError::Validation(err)
        }
    }
}
