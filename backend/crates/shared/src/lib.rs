//! Shared Kernel - Domain-crossing minimal core
//!
//! The smallest vocabulary shared by every club crate:
//! - Unified error type and result alias
//! - Typed integer identifiers for persisted records
//!
//! **Design Principle**: Only include things that are "hard to change"
//! and have consistent meaning across all domains.

pub mod error {
    pub mod app_error;
    pub mod conversions;
    pub mod kind;
}
pub mod id;
