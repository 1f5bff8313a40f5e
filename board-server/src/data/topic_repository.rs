use crate::domain::error::DomainError;
use crate::domain::topic::{NewTopic, Topic};
use async_trait::async_trait;
use sqlx::PgPool;
use tracing::{error, info};

#[async_trait]
pub trait TopicRepository: Send + Sync {
    async fn create(&self, topic: NewTopic) -> Result<Topic, DomainError>;
    /// Every topic whose slug equals `slug`. More than one row means the
    /// slug is ambiguous.
    async fn find_by_slug(&self, slug: &str) -> Result<Vec<Topic>, DomainError>;
}

#[derive(Clone)]
pub struct PostgresTopicRepository {
    pool: PgPool,
}

impl PostgresTopicRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl TopicRepository for PostgresTopicRepository {
    async fn create(&self, topic: NewTopic) -> Result<Topic, DomainError> {
        let topic = sqlx::query_as::<_, Topic>(
            r#"
            INSERT INTO topics (title, description, slug)
            VALUES ($1, $2, $3)
            RETURNING id, title, description, slug, created_at
            "#,
        )
        .bind(&topic.title)
        .bind(&topic.description)
        .bind(&topic.slug)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            error!("failed to create topic: {}", e);
            DomainError::from(e)
        })?;

        info!(topic_id = %topic.id, slug = %topic.slug, "topic created");
        Ok(topic)
    }

    async fn find_by_slug(&self, slug: &str) -> Result<Vec<Topic>, DomainError> {
        sqlx::query_as::<_, Topic>(
            r#"
            SELECT id, title, description, slug, created_at
            FROM topics WHERE slug = $1
            ORDER BY created_at DESC, id DESC
            "#,
        )
        .bind(slug)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            error!("db error find_by_slug {}: {}", slug, e);
            DomainError::from(e)
        })
    }
}
