use std::str::FromStr;
use std::sync::Arc;
use std::time::Duration;

use crate::application::store_call;
use crate::data::post_repository::{PostFilter, PostRepository};
use crate::domain::{error::DomainError, post::NewPost, post::Post};
use serde::Deserialize;
use tracing::instrument;
use uuid::Uuid;

/// Whether the global feed shows topic posts next to standalone ones.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FeedScope {
    #[default]
    All,
    Standalone,
}

impl FeedScope {
    fn filter(self) -> PostFilter {
        match self {
            FeedScope::All => PostFilter::All,
            FeedScope::Standalone => PostFilter::Standalone,
        }
    }
}

impl FromStr for FeedScope {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "all" => Ok(FeedScope::All),
            "standalone" => Ok(FeedScope::Standalone),
            other => Err(format!(
                "unknown feed scope {other:?}, expected \"all\" or \"standalone\""
            )),
        }
    }
}

pub struct PostService<R: PostRepository + ?Sized + 'static = dyn PostRepository> {
    repo: Arc<R>,
    feed_scope: FeedScope,
    store_timeout: Duration,
}

impl<R: PostRepository + ?Sized + 'static> Clone for PostService<R> {
    fn clone(&self) -> Self {
        Self {
            repo: Arc::clone(&self.repo),
            feed_scope: self.feed_scope,
            store_timeout: self.store_timeout,
        }
    }
}

impl<R> PostService<R>
where
    R: PostRepository + ?Sized + 'static,
{
    pub fn new(repo: Arc<R>, feed_scope: FeedScope, store_timeout: Duration) -> Self {
        Self {
            repo,
            feed_scope,
            store_timeout,
        }
    }

    pub fn feed_scope(&self) -> FeedScope {
        self.feed_scope
    }

    #[instrument(skip(self, content))]
    pub async fn create_global_post(
        &self,
        title: String,
        content: String,
    ) -> Result<Post, DomainError> {
        if title.trim().is_empty() || content.trim().is_empty() {
            return Err(DomainError::validation("Title and content are required"));
        }

        let post = NewPost::standalone(title.trim().to_owned(), content);
        store_call(self.store_timeout, self.repo.create(post)).await
    }

    #[instrument(skip(self, content))]
    pub async fn create_topic_post(
        &self,
        content: String,
        topic_id: &str,
    ) -> Result<Post, DomainError> {
        let topic_id = topic_id.trim();
        if content.trim().is_empty() || topic_id.is_empty() {
            return Err(DomainError::validation("Content and topic_id are required"));
        }
        let topic_id = Uuid::parse_str(topic_id)
            .map_err(|_| DomainError::validation("topic_id is not a valid identifier"))?;

        let post = NewPost::for_topic(topic_id, content);
        store_call(self.store_timeout, self.repo.create(post)).await
    }

    #[instrument(skip(self))]
    pub async fn list_global_posts(&self) -> Result<Vec<Post>, DomainError> {
        store_call(self.store_timeout, self.repo.list(self.feed_scope.filter())).await
    }
}
