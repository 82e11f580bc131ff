//! Club Backend Module
//!
//! Clean Architecture structure:
//! - `domain/` - Entities, value objects, repository traits
//! - `application/` - Use cases and configuration
//! - `infra/` - Database implementations
//! - `presentation/` - HTTP handlers, DTOs, router
//!
//! ## Features
//! - Public membership applications with admin review
//! - Daily attendance sheets
//! - Member administration: soft delete, restore, role changes with history
//! - Coach grades per member
//! - News feed
//!
//! Admin-only endpoints go through the [`auth::RoleGate`] handed to the router.

pub mod application;
pub mod domain;
pub mod error;
pub mod infra;
pub mod presentation;

// Re-exports for convenience
pub use application::config::ClubConfig;
pub use error::{ClubError, ClubResult};
pub use infra::postgres::PgClubRepository;
pub use presentation::router::club_router;

// Convenience re-exports
pub mod models {
    pub use crate::domain::entity::*;
    pub use crate::domain::value_object::application_status::ApplicationStatus;
    pub use crate::domain::value_object::grade::{GradeCategory, Score};
    pub use crate::presentation::dto::*;
}

pub mod handlers {
    pub use crate::presentation::handlers::*;
}

pub mod router {
    pub use crate::presentation::router::*;
}

#[cfg(test)]
mod tests;
