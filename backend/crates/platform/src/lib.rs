//! Platform Crate - Technical Infrastructure
//!
//! This crate provides shared technical foundations:
//! - Cryptographic utilities (SHA-256, HMAC-SHA256, bearer tokens)
//! - Credential digests with zeroized clear text
//! - Extraction of caller-asserted request headers

pub mod client;
pub mod crypto;
pub mod password;
