//! Credential Hashing and Verification
//!
//! Passwords are stored as a deterministic SHA-256 digest of their UTF-8
//! bytes, rendered as lowercase hex. Existing member rows were written in
//! this format, so the digest must stay a pure function of the plaintext.
//!
//! ## Security Features
//! - Zeroization of clear text on drop
//! - Redacted `Debug` output
//! - Constant-time digest comparison

use std::fmt;

use thiserror::Error;
use zeroize::{Zeroize, ZeroizeOnDrop};

use crate::crypto::{constant_time_eq, sha256_hex};

/// Maximum password length in characters
pub const MAX_PASSWORD_LENGTH: usize = 128;

/// Length of a stored digest (hex encoded SHA-256)
pub const DIGEST_HEX_LENGTH: usize = 64;

// ============================================================================
// Error Types
// ============================================================================

/// Password policy violation errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PasswordPolicyError {
    #[error("Password must be at most {max} characters (got {actual})")]
    TooLong { max: usize, actual: usize },

    #[error("Password cannot be empty or contain only whitespace")]
    EmptyOrWhitespace,

    #[error("Password contains invalid control characters")]
    InvalidCharacter,
}

/// Stored digest could not be parsed
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Invalid password digest format")]
pub struct InvalidDigestFormat;

// ============================================================================
// Clear Text Password (Zeroized on drop)
// ============================================================================

/// Clear text password with automatic memory zeroization
///
/// Does not implement `Clone`; debug output is redacted.
#[derive(Zeroize, ZeroizeOnDrop)]
pub struct ClearTextPassword(String);

impl ClearTextPassword {
    /// Validate and wrap a password taken from a request body.
    ///
    /// The bytes are kept exactly as submitted (no trimming, no Unicode
    /// normalization) because the digest is computed over them.
    pub fn new(raw: String) -> Result<Self, PasswordPolicyError> {
        if raw.trim().is_empty() {
            return Err(PasswordPolicyError::EmptyOrWhitespace);
        }

        let char_count = raw.chars().count();
        if char_count > MAX_PASSWORD_LENGTH {
            return Err(PasswordPolicyError::TooLong {
                max: MAX_PASSWORD_LENGTH,
                actual: char_count,
            });
        }

        if raw.chars().any(|ch| ch.is_control() && ch != '\t') {
            return Err(PasswordPolicyError::InvalidCharacter);
        }

        Ok(Self(raw))
    }

    #[cfg(test)]
    pub fn new_unchecked(raw: String) -> Self {
        Self(raw)
    }

    pub(crate) fn as_bytes(&self) -> &[u8] {
        self.0.as_bytes()
    }

    /// Digest for storage or comparison
    pub fn digest(&self) -> PasswordDigest {
        PasswordDigest {
            hex: sha256_hex(self.as_bytes()),
        }
    }
}

impl fmt::Debug for ClearTextPassword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("ClearTextPassword")
            .field(&"[REDACTED]")
            .finish()
    }
}

// ============================================================================
// Password Digest (Safe to store)
// ============================================================================

/// Hex-encoded SHA-256 digest of a password
#[derive(Clone, PartialEq, Eq)]
pub struct PasswordDigest {
    hex: String,
}

impl PasswordDigest {
    /// Parse a digest loaded from the database
    pub fn from_hex(s: impl Into<String>) -> Result<Self, InvalidDigestFormat> {
        let hex = s.into().to_ascii_lowercase();
        if hex.len() != DIGEST_HEX_LENGTH || !hex.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(InvalidDigestFormat);
        }
        Ok(Self { hex })
    }

    pub fn as_hex(&self) -> &str {
        &self.hex
    }

    /// Check a clear text password against this digest in constant time
    pub fn matches(&self, password: &ClearTextPassword) -> bool {
        let candidate = sha256_hex(password.as_bytes());
        constant_time_eq(candidate.as_bytes(), self.hex.as_bytes())
    }
}

impl fmt::Debug for PasswordDigest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PasswordDigest")
            .field("hex", &"[HASH]")
            .finish()
    }
}
