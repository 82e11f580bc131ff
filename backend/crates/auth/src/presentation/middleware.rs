//! Request extractors for caller-asserted identity
//!
//! Neither header is authenticated. Handlers pass [`AssertedRole`] to a
//! [`RoleGate`] and use [`ActingMember`] only for attribution.

use std::convert::Infallible;

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use kernel::id::MemberId;
use platform::client::{extract_asserted_role, extract_asserted_user_id};

use crate::domain::authorization::RoleGate;
use crate::error::{AuthError, AuthResult};

/// Role claim from `X-User-Role` (empty when absent)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssertedRole(pub String);

impl AssertedRole {
    /// Ask `gate` whether this claim may use admin endpoints
    pub fn require_admin(&self, gate: &dyn RoleGate) -> AuthResult<()> {
        if gate.authorize(&self.0) {
            Ok(())
        } else {
            Err(AuthError::AccessDenied)
        }
    }
}

impl<S> FromRequestParts<S> for AssertedRole
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Ok(Self(extract_asserted_role(&parts.headers)))
    }
}

/// Member id from `X-User-Id`, if it parses as an integer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ActingMember(pub Option<MemberId>);

impl<S> FromRequestParts<S> for ActingMember
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Ok(Self(
            extract_asserted_user_id(&parts.headers).map(MemberId::new),
        ))
    }
}
