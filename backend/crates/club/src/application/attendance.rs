//! Attendance Use Case

use std::sync::Arc;

use chrono::{NaiveDate, Utc};
use kernel::id::MemberId;

use crate::domain::entity::attendance::{AttendanceEntry, AttendanceMark, parse_day};
use crate::domain::repository::AttendanceRepository;
use crate::error::ClubResult;

/// Attendance sheet for one day
#[derive(Debug, Clone)]
pub struct AttendanceSheet {
    pub date: NaiveDate,
    pub entries: Vec<AttendanceEntry>,
}

/// Mark input; missing fields take their defaults
pub struct MarkAttendanceInput {
    pub member_id: MemberId,
    pub date: Option<String>,
    pub present: Option<bool>,
    pub notes: Option<String>,
}

/// Attendance use case
pub struct AttendanceUseCase<R>
where
    R: AttendanceRepository,
{
    repo: Arc<R>,
}

impl<R> AttendanceUseCase<R>
where
    R: AttendanceRepository,
{
    pub fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }

    /// Sheet for `date`, or for today (UTC) when absent
    pub async fn sheet(&self, date: Option<&str>) -> ClubResult<AttendanceSheet> {
        let date = resolve_day(date)?;
        let entries = self.repo.sheet(date).await?;
        Ok(AttendanceSheet { date, entries })
    }

    pub async fn mark(&self, input: MarkAttendanceInput) -> ClubResult<()> {
        let date = resolve_day(input.date.as_deref())?;
        let mark = AttendanceMark::new(
            input.member_id,
            date,
            input.present.unwrap_or(false),
            input.notes.as_deref().unwrap_or_default(),
        )?;

        self.repo.upsert_mark(&mark).await?;

        tracing::info!(
            member_id = %mark.member_id,
            date = %mark.date,
            present = mark.present,
            "Attendance marked"
        );
        Ok(())
    }
}

fn resolve_day(raw: Option<&str>) -> ClubResult<NaiveDate> {
    match raw.filter(|d| !d.trim().is_empty()) {
        Some(raw) => Ok(parse_day(raw)?),
        None => Ok(Utc::now().date_naive()),
    }
}
