//! Application Layer
//!
//! Use cases and application services.

pub mod applications;
pub mod attendance;
pub mod config;
pub mod grades;
pub mod members;
pub mod news;

// Re-exports
pub use applications::{ApplicationsUseCase, SubmitApplicationInput};
pub use attendance::{AttendanceSheet, AttendanceUseCase, MarkAttendanceInput};
pub use config::ClubConfig;
pub use grades::{AddGradeInput, GradesUseCase};
pub use members::{ChangeRoleInput, MembersUseCase};
pub use news::{NewsUseCase, PublishArticleInput};
