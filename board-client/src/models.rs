use chrono::{DateTime, Utc};
use derive_more::Display;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Display)]
#[display("{title} ({slug})")]
pub struct Topic {
    pub id: Uuid,
    pub title: String,
    pub description: Option<String>,
    pub slug: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Post {
    pub id: Uuid,
    pub title: Option<String>,
    pub content: String,
    pub topic_id: Option<Uuid>,
    pub created_at: DateTime<Utc>,
}

impl std::fmt::Display for Post {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}] ", self.created_at.format("%Y-%m-%d %H:%M:%S"))?;
        if let Some(title) = &self.title {
            write!(f, "{}: ", title)?;
        }
        write!(f, "{}", self.content)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TopicWithPosts {
    pub topic: Topic,
    pub posts: Vec<Post>,
}
