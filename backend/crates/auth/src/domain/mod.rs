//! Domain Layer
//!
//! Contains entities, value objects, the role gate and repository traits.

pub mod authorization;
pub mod entity;
pub mod repository;
pub mod value_object;

// Re-exports
pub use authorization::{HeaderRoleGate, RoleGate};
pub use entity::{auth_session::AuthSession, member_account::MemberAccount};
pub use repository::{AuthSessionRepository, MemberAccountRepository};
