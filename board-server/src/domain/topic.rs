use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::post::Post;
use crate::domain::slug::slugify;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Topic {
    pub id: Uuid,
    pub title: String,
    pub description: Option<String>,
    pub slug: String,
    pub created_at: DateTime<Utc>,
}

/// A topic that has not been written yet. The store assigns `id` and
/// `created_at`.
#[derive(Debug, Clone)]
pub struct NewTopic {
    pub title: String,
    pub description: Option<String>,
    pub slug: String,
}

impl NewTopic {
    pub fn new(title: String, description: Option<String>) -> Self {
        let slug = slugify(&title);
        let description = description.filter(|d| !d.trim().is_empty());
        Self {
            title,
            description,
            slug,
        }
    }
}

/// A topic together with its feed, newest post first.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TopicWithPosts {
    pub topic: Topic,
    pub posts: Vec<Post>,
}
