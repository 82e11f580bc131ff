//! Auth (Authentication) Backend Module
//!
//! Clean Architecture structure:
//! - `domain/` - Entities, value objects, role gate, repository traits
//! - `application/` - Use cases and application services
//! - `infra/` - Database implementations
//! - `presentation/` - HTTP handlers, DTOs, router, extractors
//!
//! ## Features
//! - Email + password registration and login
//! - Telegram login widget sign-in (HMAC-SHA256 signed payloads)
//! - Opaque bearer tokens backed by server-side sessions
//! - Role gate for admin-only club endpoints
//!
//! ## Security Model
//! - Passwords stored as SHA-256 hex digests, compared in constant time
//! - Only token digests are persisted; the clear token leaves once
//! - Telegram payloads older than the configured max age are rejected
//! - The role gate trusts the `X-User-Role` header (see [`domain::authorization`])

pub mod application;
pub mod domain;
pub mod error;
pub mod infra;
pub mod presentation;

// Re-exports for convenience
pub use application::config::AuthConfig;
pub use domain::authorization::{HeaderRoleGate, RoleGate};
pub use error::{AuthError, AuthResult};
pub use infra::postgres::PgAuthRepository;
pub use presentation::router::auth_router;

// Re-export kernel error types for unified error handling
pub use kernel::error::{
    app_error::{AppError, AppResult},
    kind::ErrorKind,
};

// Convenience re-exports
pub mod config {
    pub use crate::application::config::*;
}

pub mod models {
    pub use crate::domain::entity::*;
    pub use crate::domain::value_object::*;
    pub use crate::presentation::dto::*;
}

pub mod handlers {
    pub use crate::presentation::handlers::*;
}

pub mod store {
    pub use crate::infra::postgres::PgAuthRepository as AuthStore;
}

pub mod router {
    pub use crate::presentation::router::*;
}

pub mod middleware {
    pub use crate::presentation::middleware::*;
}
