use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// Missing or null fields deserialize as `None` so the services can answer
// with their own validation messages.

#[derive(Debug, Deserialize)]
pub struct CreatePostRequest {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub content: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct CreateTopicPostRequest {
    #[serde(default)]
    pub content: Option<String>,
    #[serde(default)]
    pub topic_id: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct CreateTopicRequest {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct TopicQuery {
    pub slug: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub timestamp: DateTime<Utc>,
}
