mod error;
mod http_client;
mod models;

pub use error::BoardClientError;
pub use http_client::BoardClientHttp;
pub use models::{Post, Topic, TopicWithPosts};

use async_trait::async_trait;
use uuid::Uuid;

#[async_trait]
pub trait BoardClientTrait: Send + Sync {
    /// The global feed, newest first.
    async fn list_posts(&self) -> Result<Vec<Post>, BoardClientError>;
    async fn create_post(&self, title: String, content: String) -> Result<Post, BoardClientError>;
    async fn create_topic(
        &self,
        title: String,
        description: Option<String>,
    ) -> Result<Topic, BoardClientError>;
    async fn get_topic(&self, slug: &str) -> Result<TopicWithPosts, BoardClientError>;
    async fn create_topic_post(
        &self,
        topic_id: Uuid,
        content: String,
    ) -> Result<Post, BoardClientError>;
}

/// The link a topic is shared under: `<origin>/topic/<slug>`.
pub fn share_url(origin: &str, slug: &str) -> String {
    format!("{}/topic/{}", origin.trim_end_matches('/'), slug)
}
