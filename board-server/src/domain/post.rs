use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A single anonymous message. Standalone posts carry a `title` and no
/// `topic_id`; topic posts carry a `topic_id` and no `title`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Post {
    pub id: Uuid,
    pub title: Option<String>,
    pub content: String,
    pub topic_id: Option<Uuid>,
    pub created_at: DateTime<Utc>,
}

impl Post {
    pub fn is_standalone(&self) -> bool {
        self.topic_id.is_none()
    }
}

#[derive(Debug, Clone)]
pub struct NewPost {
    pub title: Option<String>,
    pub content: String,
    pub topic_id: Option<Uuid>,
}

impl NewPost {
    pub fn standalone(title: String, content: String) -> Self {
        Self {
            title: Some(title),
            content,
            topic_id: None,
        }
    }

    pub fn for_topic(topic_id: Uuid, content: String) -> Self {
        Self {
            title: None,
            content,
            topic_id: Some(topic_id),
        }
    }
}
