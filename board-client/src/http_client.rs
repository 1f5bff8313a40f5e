use crate::BoardClientTrait;
use crate::error::BoardClientError;
use crate::models::{Post, Topic, TopicWithPosts};
use async_trait::async_trait;
use reqwest::{Client, Response};
use serde::de::DeserializeOwned;
use serde_json::json;
use std::sync::Arc;
use uuid::Uuid;

#[derive(Clone)]
pub struct BoardClientHttp {
    client: Arc<Client>,
    base_url: String,
}

impl BoardClientHttp {
    pub fn connect(endpoint: &str) -> Result<Self, BoardClientError> {
        let base_url = endpoint.trim_end_matches('/').to_string();
        if base_url.is_empty() {
            return Err(BoardClientError::InvalidRequest(
                "server endpoint must not be empty".into(),
            ));
        }
        Ok(Self {
            client: Arc::new(Client::builder().build()?),
            base_url,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}/api/{}", self.base_url, path)
    }

    async fn parse<T: DeserializeOwned>(resp: Response) -> Result<T, BoardClientError> {
        if resp.status().is_success() {
            Ok(resp.json().await?)
        } else {
            Err(BoardClientError::from_http_response(resp).await)
        }
    }
}

#[async_trait]
impl BoardClientTrait for BoardClientHttp {
    async fn list_posts(&self) -> Result<Vec<Post>, BoardClientError> {
        let resp = self.client.get(self.url("posts")).send().await?;
        Self::parse(resp).await
    }

    async fn create_post(&self, title: String, content: String) -> Result<Post, BoardClientError> {
        let resp = self
            .client
            .post(self.url("posts"))
            .json(&json!({
                "title": title,
                "content": content,
            }))
            .send()
            .await?;
        Self::parse(resp).await
    }

    async fn create_topic(
        &self,
        title: String,
        description: Option<String>,
    ) -> Result<Topic, BoardClientError> {
        let resp = self
            .client
            .post(self.url("topics"))
            .json(&json!({
                "title": title,
                "description": description,
            }))
            .send()
            .await?;
        Self::parse(resp).await
    }

    async fn get_topic(&self, slug: &str) -> Result<TopicWithPosts, BoardClientError> {
        let resp = self
            .client
            .get(self.url("topic"))
            .query(&[("slug", slug)])
            .send()
            .await?;
        Self::parse(resp).await
    }

    async fn create_topic_post(
        &self,
        topic_id: Uuid,
        content: String,
    ) -> Result<Post, BoardClientError> {
        let resp = self
            .client
            .post(self.url("topic"))
            .json(&json!({
                "content": content,
                "topic_id": topic_id,
            }))
            .send()
            .await?;
        Self::parse(resp).await
    }
}
