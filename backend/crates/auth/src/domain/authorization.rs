//! Role Gate
//!
//! Admin-only endpoints ask a [`RoleGate`] before touching data. The
//! shipped gate trusts the `X-User-Role` header sent by the web client,
//! which anyone can forge. A session-backed gate can replace it without
//! changing handlers.

/// Role claim that unlocks admin endpoints
pub const ADMIN_ROLE: &str = "admin";

/// Decides whether a caller-asserted role may use admin endpoints
pub trait RoleGate: Send + Sync {
    fn authorize(&self, asserted_role: &str) -> bool;
}

/// Gate that accepts the literal role claim `admin`
#[derive(Debug, Clone, Copy, Default)]
pub struct HeaderRoleGate;

impl RoleGate for HeaderRoleGate {
    fn authorize(&self, asserted_role: &str) -> bool {
        authorize(asserted_role)
    }
}

/// Exact, case-sensitive match against `admin`
pub fn authorize(asserted_role: &str) -> bool {
    asserted_role == ADMIN_ROLE
}
