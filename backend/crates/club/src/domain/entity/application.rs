//! Membership Application Entity

use auth::models::{email::Email, full_name::FullName};
use chrono::{DateTime, Utc};
use kernel::error::app_error::AppResult;
use kernel::id::ApplicationId;

use crate::domain::value_object::{application_status::ApplicationStatus, text};

pub const PHONE_MAX_LENGTH: usize = 32;
pub const MESSAGE_MAX_LENGTH: usize = 2000;

/// Application submitted through the public join form
#[derive(Debug, Clone)]
pub struct MembershipApplication {
    pub id: ApplicationId,
    pub full_name: String,
    pub email: String,
    pub phone: String,
    pub message: String,
    pub status: ApplicationStatus,
    pub created_at: DateTime<Utc>,
}

/// Validated application ready to insert
#[derive(Debug, Clone)]
pub struct NewApplication {
    pub full_name: FullName,
    pub email: Email,
    pub phone: String,
    pub message: String,
}

impl NewApplication {
    pub fn new(full_name: &str, email: &str, phone: &str, message: &str) -> AppResult<Self> {
        Ok(Self {
            full_name: FullName::new(full_name)?,
            email: Email::new(email)?,
            phone: text::limited("Phone", phone, PHONE_MAX_LENGTH)?,
            message: text::limited("Message", message, MESSAGE_MAX_LENGTH)?,
        })
    }
}
