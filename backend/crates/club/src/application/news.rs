//! News Use Case

use std::sync::Arc;

use kernel::id::{MemberId, NewsId};

use crate::application::config::ClubConfig;
use crate::domain::entity::news::{NewArticle, NewsArticle};
use crate::domain::repository::NewsRepository;
use crate::error::ClubResult;

/// Publish input
pub struct PublishArticleInput {
    pub title: String,
    pub content: String,
    pub author_id: Option<MemberId>,
    pub image_url: Option<String>,
    pub video_url: Option<String>,
}

/// News use case
pub struct NewsUseCase<R>
where
    R: NewsRepository,
{
    repo: Arc<R>,
    config: Arc<ClubConfig>,
}

impl<R> NewsUseCase<R>
where
    R: NewsRepository,
{
    pub fn new(repo: Arc<R>, config: Arc<ClubConfig>) -> Self {
        Self { repo, config }
    }

    pub async fn feed(&self) -> ClubResult<Vec<NewsArticle>> {
        self.repo.latest(self.config.news_feed_limit).await
    }

    pub async fn publish(&self, input: PublishArticleInput) -> ClubResult<NewsId> {
        let article = NewArticle::new(
            &input.title,
            &input.content,
            input.author_id,
            input.image_url.as_deref(),
            input.video_url.as_deref(),
        )?;

        let id = self.repo.publish(&article).await?;

        tracing::info!(news_id = %id, "Article published");
        Ok(id)
    }
}
