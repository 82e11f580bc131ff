//! Application Configuration
//!
//! Configuration for the Auth application layer.

use std::fmt;
use std::time::Duration;

/// Auth application configuration
#[derive(Clone)]
pub struct AuthConfig {
    /// Telegram bot token; `None` disables Telegram login
    pub telegram_bot_token: Option<String>,
    /// Oldest accepted Telegram `auth_date` (24 hours)
    pub telegram_auth_max_age: Duration,
    /// Tolerated clock skew for `auth_date` in the future (60 seconds)
    pub telegram_clock_skew: Duration,
    /// Bearer token lifetime (1 week)
    pub session_ttl: Duration,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            telegram_bot_token: None,
            telegram_auth_max_age: Duration::from_secs(24 * 3600), // 24 hours
            telegram_clock_skew: Duration::from_secs(60),
            session_ttl: Duration::from_secs(7 * 24 * 3600), // 1 week
        }
    }
}

impl AuthConfig {
    /// Create config for development (short sessions, no Telegram)
    pub fn development() -> Self {
        Self {
            session_ttl: Duration::from_secs(12 * 3600),
            ..Default::default()
        }
    }

    pub fn with_telegram_bot_token(mut self, token: impl Into<String>) -> Self {
        self.telegram_bot_token = Some(token.into());
        self
    }

    /// Bot token, if Telegram login is enabled (blank counts as absent)
    pub fn telegram_secret(&self) -> Option<&str> {
        self.telegram_bot_token
            .as_deref()
            .filter(|token| !token.trim().is_empty())
    }

    pub fn session_ttl_secs(&self) -> i64 {
        self.session_ttl.as_secs() as i64
    }

    pub fn telegram_auth_max_age_secs(&self) -> i64 {
        self.telegram_auth_max_age.as_secs() as i64
    }

    pub fn telegram_clock_skew_secs(&self) -> i64 {
        self.telegram_clock_skew.as_secs() as i64
    }
}

impl fmt::Debug for AuthConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AuthConfig")
            .field(
                "telegram_bot_token",
                &self.telegram_bot_token.as_ref().map(|_| "[REDACTED]"),
            )
            .field("telegram_auth_max_age", &self.telegram_auth_max_age)
            .field("telegram_clock_skew", &self.telegram_clock_skew)
            .field("session_ttl", &self.session_ttl)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = AuthConfig::default();
        assert_eq!(config.session_ttl_secs(), 604_800);
        assert_eq!(config.telegram_auth_max_age_secs(), 86_400);
        assert_eq!(config.telegram_clock_skew_secs(), 60);
        assert!(config.telegram_secret().is_none());
    }

    #[test]
    fn test_blank_bot_token_disables_telegram() {
        let config = AuthConfig::default().with_telegram_bot_token("  ");
        assert!(config.telegram_secret().is_none());

        let config = AuthConfig::default().with_telegram_bot_token("123:abc");
        assert_eq!(config.telegram_secret(), Some("123:abc"));
    }

    #[test]
    fn test_debug_redacts_bot_token() {
        let config = AuthConfig::development().with_telegram_bot_token("123:secret");
        let debug = format!("{:?}", config);
        assert!(!debug.contains("secret"));
        assert!(debug.contains("REDACTED"));
    }
}
