//! Application Configuration
//!
//! Configuration for the Club application layer.

/// Club application configuration
#[derive(Debug, Clone)]
pub struct ClubConfig {
    /// Articles returned by the news feed
    pub news_feed_limit: i64,
}

impl Default for ClubConfig {
    fn default() -> Self {
        Self {
            news_feed_limit: 50,
        }
    }
}

impl ClubConfig {
    /// Create config for development (smaller news feed)
    pub fn development() -> Self {
        Self {
            news_feed_limit: 20,
        }
    }

    pub fn with_news_feed_limit(mut self, limit: i64) -> Self {
        self.news_feed_limit = limit.max(1);
        self
    }
}
