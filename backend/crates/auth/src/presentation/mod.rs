//! Presentation Layer
//!
//! HTTP handlers, DTOs, router, and request extractors.

pub mod dto;
pub mod handlers;
pub mod middleware;
pub mod router;

pub use handlers::AuthAppState;
pub use middleware::{ActingMember, AssertedRole};
pub use router::{auth_router, auth_router_generic};
