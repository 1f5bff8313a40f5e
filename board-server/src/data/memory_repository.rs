use crate::data::post_repository::{PostFilter, PostRepository};
use crate::data::topic_repository::TopicRepository;
use crate::domain::error::DomainError;
use crate::domain::post::{NewPost, Post};
use crate::domain::topic::{NewTopic, Topic};
use async_trait::async_trait;
use chrono::{DateTime, SubsecRound, TimeDelta, Utc};
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{debug, info};
use uuid::Uuid;

#[derive(Default)]
struct Tables {
    topics: Vec<Topic>,
    /// Insertion order, which is also `created_at` order.
    posts: Vec<Post>,
    last_created_at: Option<DateTime<Utc>>,
}

impl Tables {
    /// Strictly increasing at microsecond precision, like a database column.
    fn next_created_at(&mut self) -> DateTime<Utc> {
        let now = Utc::now().trunc_subsecs(6);
        let ts = match self.last_created_at {
            Some(prev) if now <= prev => prev + TimeDelta::microseconds(1),
            _ => now,
        };
        self.last_created_at = Some(ts);
        ts
    }
}

/// Process-local store holding both tables. Enforces the post to topic
/// foreign key the same way the database does.
#[derive(Clone, Default)]
pub struct InMemoryStore {
    tables: Arc<RwLock<Tables>>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl TopicRepository for InMemoryStore {
    async fn create(&self, topic: NewTopic) -> Result<Topic, DomainError> {
        let mut tables = self.tables.write().await;
        let created_at = tables.next_created_at();
        let topic = Topic {
            id: Uuid::new_v4(),
            title: topic.title,
            description: topic.description,
            slug: topic.slug,
            created_at,
        };
        tables.topics.push(topic.clone());

        info!(topic_id = %topic.id, slug = %topic.slug, "topic created");
        Ok(topic)
    }

    async fn find_by_slug(&self, slug: &str) -> Result<Vec<Topic>, DomainError> {
        let tables = self.tables.read().await;
        Ok(tables
            .topics
            .iter()
            .rev()
            .filter(|t| t.slug == slug)
            .cloned()
            .collect())
    }
}

#[async_trait]
impl PostRepository for InMemoryStore {
    async fn create(&self, post: NewPost) -> Result<Post, DomainError> {
        let mut tables = self.tables.write().await;

        if let Some(topic_id) = post.topic_id {
            if !tables.topics.iter().any(|t| t.id == topic_id) {
                debug!(%topic_id, "rejected post for unknown topic");
                return Err(DomainError::Persistence(format!(
                    "insert on posts violates foreign key: topic {} does not exist",
                    topic_id
                )));
            }
        }

        let created_at = tables.next_created_at();
        let post = Post {
            id: Uuid::new_v4(),
            title: post.title,
            content: post.content,
            topic_id: post.topic_id,
            created_at,
        };
        tables.posts.push(post.clone());

        info!(post_id = %post.id, "post created");
        Ok(post)
    }

    async fn list(&self, filter: PostFilter) -> Result<Vec<Post>, DomainError> {
        let tables = self.tables.read().await;
        let posts = tables
            .posts
            .iter()
            .rev()
            .filter(|p| match filter {
                PostFilter::All => true,
                PostFilter::Standalone => p.is_standalone(),
                PostFilter::Topic(topic_id) => p.topic_id == Some(topic_id),
            })
            .cloned()
            .collect();
        Ok(posts)
    }
}
