//! Attendance Entities

use chrono::NaiveDate;
use kernel::error::app_error::{AppError, AppResult};
use kernel::id::MemberId;

use crate::domain::value_object::text;

pub const NOTES_MAX_LENGTH: usize = 500;

/// Date format used in query strings and bodies
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Parse a `YYYY-MM-DD` day
pub fn parse_day(raw: &str) -> AppResult<NaiveDate> {
    NaiveDate::parse_from_str(raw.trim(), DATE_FORMAT).map_err(|_| {
        AppError::bad_request(format!("Invalid date: {}", raw))
            .with_action("Use the YYYY-MM-DD format")
    })
}

/// One row of a day's attendance sheet
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttendanceEntry {
    pub member_id: MemberId,
    pub full_name: String,
    pub email: Option<String>,
    /// `false` when nobody marked the member that day
    pub present: bool,
    pub notes: Option<String>,
}

/// Mark to upsert for a member on a day
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttendanceMark {
    pub member_id: MemberId,
    pub date: NaiveDate,
    pub present: bool,
    pub notes: String,
}

impl AttendanceMark {
    pub fn new(member_id: MemberId, date: NaiveDate, present: bool, notes: &str) -> AppResult<Self> {
        Ok(Self {
            member_id,
            date,
            present,
            notes: text::limited("Notes", notes, NOTES_MAX_LENGTH)?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_day() {
        assert_eq!(
            parse_day("2024-09-01").unwrap(),
            NaiveDate::from_ymd_opt(2024, 9, 1).unwrap()
        );
        assert!(parse_day("01.09.2024").is_err());
        assert!(parse_day("2024-02-30").is_err());
        assert!(parse_day("").is_err());
    }
}
