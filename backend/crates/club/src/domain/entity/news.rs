//! News Entities

use chrono::{DateTime, Utc};
use kernel::error::app_error::AppResult;
use kernel::id::{MemberId, NewsId};

use crate::domain::value_object::text;

pub const TITLE_MAX_LENGTH: usize = 200;
pub const CONTENT_MAX_LENGTH: usize = 20_000;
pub const URL_MAX_LENGTH: usize = 2048;

/// Published article with its author's name
#[derive(Debug, Clone)]
pub struct NewsArticle {
    pub id: NewsId,
    pub title: String,
    pub content: String,
    pub author_id: Option<MemberId>,
    pub author_name: Option<String>,
    pub image_url: Option<String>,
    pub video_url: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Validated article ready to insert
#[derive(Debug, Clone)]
pub struct NewArticle {
    pub title: String,
    pub content: String,
    pub author_id: Option<MemberId>,
    pub image_url: Option<String>,
    pub video_url: Option<String>,
}

impl NewArticle {
    pub fn new(
        title: &str,
        content: &str,
        author_id: Option<MemberId>,
        image_url: Option<&str>,
        video_url: Option<&str>,
    ) -> AppResult<Self> {
        Ok(Self {
            title: text::required("Title", title, TITLE_MAX_LENGTH)?,
            content: text::required("Content", content, CONTENT_MAX_LENGTH)?,
            author_id,
            image_url: text::optional("Image URL", image_url, URL_MAX_LENGTH)?,
            video_url: text::optional("Video URL", video_url, URL_MAX_LENGTH)?,
        })
    }
}
