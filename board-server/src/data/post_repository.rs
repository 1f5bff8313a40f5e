use crate::domain::error::DomainError;
use crate::domain::post::{NewPost, Post};
use async_trait::async_trait;
use sqlx::{PgPool, Postgres};
use tracing::{error, info};
use uuid::Uuid;

/// Which posts a listing covers. Every listing is newest first.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PostFilter {
    All,
    Standalone,
    Topic(Uuid),
}

#[async_trait]
pub trait PostRepository: Send + Sync {
    async fn create(&self, post: NewPost) -> Result<Post, DomainError>;
    async fn list(&self, filter: PostFilter) -> Result<Vec<Post>, DomainError>;
}

#[derive(Clone)]
pub struct PostgresPostRepository {
    pool: PgPool,
}

impl PostgresPostRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl PostRepository for PostgresPostRepository {
    async fn create(&self, post: NewPost) -> Result<Post, DomainError> {
        let post = sqlx::query_as::<Postgres, Post>(
            r#"
            INSERT INTO posts (title, content, topic_id)
            VALUES ($1, $2, $3)
            RETURNING id, title, content, topic_id, created_at
            "#,
        )
        .bind(&post.title)
        .bind(&post.content)
        .bind(post.topic_id)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            error!("failed to create post: {}", e);
            DomainError::from(e)
        })?;

        match post.topic_id {
            Some(topic_id) => info!(post_id = %post.id, topic_id = %topic_id, "post created"),
            None => info!(post_id = %post.id, "post created"),
        }
        Ok(post)
    }

    async fn list(&self, filter: PostFilter) -> Result<Vec<Post>, DomainError> {
        let query = match filter {
            PostFilter::All => sqlx::query_as::<Postgres, Post>(
                r#"
                SELECT id, title, content, topic_id, created_at
                FROM posts
                ORDER BY created_at DESC, id DESC
                "#,
            ),
            PostFilter::Standalone => sqlx::query_as::<Postgres, Post>(
                r#"
                SELECT id, title, content, topic_id, created_at
                FROM posts WHERE topic_id IS NULL
                ORDER BY created_at DESC, id DESC
                "#,
            ),
            PostFilter::Topic(topic_id) => sqlx::query_as::<Postgres, Post>(
                r#"
                SELECT id, title, content, topic_id, created_at
                FROM posts WHERE topic_id = $1
                ORDER BY created_at DESC, id DESC
                "#,
            )
            .bind(topic_id),
        };

        query.fetch_all(&self.pool).await.map_err(|e| {
            error!(?filter, "db error while fetching posts: {}", e);
            DomainError::from(e)
        })
    }
}
