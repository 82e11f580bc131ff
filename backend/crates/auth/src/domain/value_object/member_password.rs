//! Member Password Value Objects
//!
//! - [`RawPassword`]: clear text from a request body (zeroized on drop)
//! - [`StoredPassword`]: digest persisted in `users.password_hash`

use kernel::error::app_error::{AppError, AppResult};
use platform::password::{ClearTextPassword, PasswordDigest, PasswordPolicyError};

/// Clear text password as submitted by the caller
#[derive(Debug)]
pub struct RawPassword(ClearTextPassword);

impl RawPassword {
    pub fn new(raw: String) -> AppResult<Self> {
        ClearTextPassword::new(raw)
            .map(Self)
            .map_err(policy_error_to_app_error)
    }

    /// Digest to persist for a new account
    pub fn to_stored(&self) -> StoredPassword {
        StoredPassword(self.0.digest())
    }
}

/// Persisted password digest
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredPassword(PasswordDigest);

impl StoredPassword {
    pub fn from_db(hex: String) -> AppResult<Self> {
        PasswordDigest::from_hex(hex)
            .map(Self)
            .map_err(|e| AppError::internal("Stored password digest is corrupt").with_source(e))
    }

    pub fn as_db(&self) -> &str {
        self.0.as_hex()
    }

    pub fn verify(&self, candidate: &RawPassword) -> bool {
        self.0.matches(&candidate.0)
    }
}

fn policy_error_to_app_error(err: PasswordPolicyError) -> AppError {
    let message = err.to_string();
    AppError::bad_request(message).with_source(err)
}
