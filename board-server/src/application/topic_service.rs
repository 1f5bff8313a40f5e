use std::sync::Arc;
use std::time::Duration;

use crate::application::store_call;
use crate::data::post_repository::{PostFilter, PostRepository};
use crate::data::topic_repository::TopicRepository;
use crate::domain::error::DomainError;
use crate::domain::topic::{NewTopic, Topic, TopicWithPosts};
use tracing::{instrument, warn};

pub struct TopicService<T = dyn TopicRepository, P = dyn PostRepository>
where
    T: TopicRepository + ?Sized + 'static,
    P: PostRepository + ?Sized + 'static,
{
    topics: Arc<T>,
    posts: Arc<P>,
    store_timeout: Duration,
}

impl<T, P> Clone for TopicService<T, P>
where
    T: TopicRepository + ?Sized + 'static,
    P: PostRepository + ?Sized + 'static,
{
    fn clone(&self) -> Self {
        Self {
            topics: Arc::clone(&self.topics),
            posts: Arc::clone(&self.posts),
            store_timeout: self.store_timeout,
        }
    }
}

impl<T, P> TopicService<T, P>
where
    T: TopicRepository + ?Sized + 'static,
    P: PostRepository + ?Sized + 'static,
{
    pub fn new(topics: Arc<T>, posts: Arc<P>, store_timeout: Duration) -> Self {
        Self {
            topics,
            posts,
            store_timeout,
        }
    }

    #[instrument(skip(self, description))]
    pub async fn create_topic(
        &self,
        title: String,
        description: Option<String>,
    ) -> Result<Topic, DomainError> {
        let title = title.trim();
        if title.is_empty() {
            return Err(DomainError::validation("Title is required"));
        }

        let topic = NewTopic::new(title.to_owned(), description);
        if topic.slug.is_empty() {
            return Err(DomainError::validation(
                "Title must contain at least one letter or digit",
            ));
        }

        store_call(self.store_timeout, self.topics.create(topic)).await
    }

    /// Resolves a slug to exactly one topic and loads its feed. The two
    /// reads are independent; no snapshot spans them.
    #[instrument(skip(self))]
    pub async fn get_topic_with_posts(&self, slug: &str) -> Result<TopicWithPosts, DomainError> {
        let slug = slug.trim();
        if slug.is_empty() {
            return Err(DomainError::validation("Slug is required"));
        }

        let mut matches = store_call(self.store_timeout, self.topics.find_by_slug(slug)).await?;
        let topic = match matches.len() {
            0 => return Err(DomainError::TopicNotFound(slug.to_owned())),
            1 => matches.remove(0),
            count => {
                warn!(slug, count, "slug resolves to more than one topic");
                return Err(DomainError::SlugConflict {
                    slug: slug.to_owned(),
                    count,
                });
            }
        };

        let posts = store_call(
            self.store_timeout,
            self.posts.list(PostFilter::Topic(topic.id)),
        )
        .await?;

        Ok(TopicWithPosts { topic, posts })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::post_service::{FeedScope, PostService};
    use crate::data::memory_repository::InMemoryStore;
    use crate::domain::post::{NewPost, Post};
    use async_trait::async_trait;

    const TIMEOUT: Duration = Duration::from_secs(5);

    fn services(store: &InMemoryStore) -> (TopicService, PostService) {
        let topics: Arc<dyn TopicRepository> = Arc::new(store.clone());
        let posts: Arc<dyn PostRepository> = Arc::new(store.clone());
        (
            TopicService::new(topics, Arc::clone(&posts), TIMEOUT),
            PostService::new(posts, FeedScope::All, TIMEOUT),
        )
    }

    #[tokio::test]
    async fn new_topic_resolves_with_empty_feed() {
        let store = InMemoryStore::new();
        let (topics, _) = services(&store);

        let topic = topics
            .create_topic("Hello, World!".into(), Some("say hi".into()))
            .await
            .unwrap();
        assert_eq!(topic.slug, "hello-world");

        let resolved = topics.get_topic_with_posts("hello-world").await.unwrap();
        assert_eq!(resolved.topic, topic);
        assert!(resolved.posts.is_empty());
    }

    #[tokio::test]
    async fn topic_post_shows_up_in_its_feed() {
        let store = InMemoryStore::new();
        let (topics, posts) = services(&store);

        let topic = topics.create_topic("Board".into(), None).await.unwrap();
        posts
            .create_topic_post("hi".into(), &topic.id.to_string())
            .await
            .unwrap();

        let resolved = topics.get_topic_with_posts(&topic.slug).await.unwrap();
        assert_eq!(resolved.posts.len(), 1);
        assert_eq!(resolved.posts[0].content, "hi");
        assert_eq!(resolved.posts[0].topic_id, Some(topic.id));
        assert_eq!(resolved.posts[0].title, None);
    }

    #[tokio::test]
    async fn feedback_scenario_lists_newest_first() {
        let store = InMemoryStore::new();
        let (topics, posts) = services(&store);

        let topic = topics
            .create_topic("Feedback".into(), Some(String::new()))
            .await
            .unwrap();
        assert_eq!(topic.slug, "feedback");
        assert_eq!(topic.description, None);

        let topic_id = topic.id.to_string();
        posts
            .create_topic_post("first".into(), &topic_id)
            .await
            .unwrap();
        posts
            .create_topic_post("second".into(), &topic_id)
            .await
            .unwrap();

        let resolved = topics.get_topic_with_posts("feedback").await.unwrap();
        let contents: Vec<_> = resolved.posts.iter().map(|p| p.content.as_str()).collect();
        assert_eq!(contents, ["second", "first"]);
    }

    #[tokio::test]
    async fn feeds_are_scoped_to_their_topic() {
        let store = InMemoryStore::new();
        let (topics, posts) = services(&store);

        let a = topics.create_topic("Alpha".into(), None).await.unwrap();
        let b = topics.create_topic("Beta".into(), None).await.unwrap();
        posts
            .create_topic_post("for alpha".into(), &a.id.to_string())
            .await
            .unwrap();
        posts
            .create_global_post("loose".into(), "standalone".into())
            .await
            .unwrap();

        let alpha = topics.get_topic_with_posts("alpha").await.unwrap();
        assert_eq!(alpha.posts.len(), 1);
        let beta = topics.get_topic_with_posts(&b.slug).await.unwrap();
        assert!(beta.posts.is_empty());
    }

    #[tokio::test]
    async fn unknown_slug_is_not_found() {
        let store = InMemoryStore::new();
        let (topics, _) = services(&store);

        let err = topics
            .get_topic_with_posts("does-not-exist")
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::TopicNotFound(slug) if slug == "does-not-exist"));
    }

    #[tokio::test]
    async fn empty_slug_is_rejected() {
        let store = InMemoryStore::new();
        let (topics, _) = services(&store);

        let err = topics.get_topic_with_posts("  ").await.unwrap_err();
        assert!(matches!(err, DomainError::Validation(_)));
    }

    #[tokio::test]
    async fn colliding_slugs_surface_as_conflict() {
        let store = InMemoryStore::new();
        let (topics, _) = services(&store);

        topics.create_topic("Feedback".into(), None).await.unwrap();
        topics.create_topic("feedback!".into(), None).await.unwrap();

        let err = topics.get_topic_with_posts("feedback").await.unwrap_err();
        assert!(matches!(err, DomainError::SlugConflict { count: 2, .. }));
    }

    #[tokio::test]
    async fn title_is_required_and_must_be_routable() {
        let store = InMemoryStore::new();
        let (topics, _) = services(&store);

        let err = topics.create_topic("   ".into(), None).await.unwrap_err();
        assert!(matches!(err, DomainError::Validation(_)));

        let err = topics.create_topic("?!".into(), None).await.unwrap_err();
        assert!(matches!(err, DomainError::Validation(_)));

        assert!(TopicRepository::find_by_slug(&store, "").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn title_is_stored_trimmed() {
        let store = InMemoryStore::new();
        let (topics, _) = services(&store);

        let topic = topics
            .create_topic("  Weekly sync  ".into(), None)
            .await
            .unwrap();
        assert_eq!(topic.title, "Weekly sync");
        assert_eq!(topic.slug, "weekly-sync");
    }

    struct UnreachableTopics;

    #[async_trait]
    impl TopicRepository for UnreachableTopics {
        async fn create(&self, _topic: NewTopic) -> Result<Topic, DomainError> {
            Err(DomainError::Persistence("connection refused".into()))
        }

        async fn find_by_slug(&self, _slug: &str) -> Result<Vec<Topic>, DomainError> {
            Err(DomainError::Persistence("connection refused".into()))
        }
    }

    /// Post listing that errors, or hangs when `stall` is set.
    struct BrokenPosts {
        stall: bool,
    }

    #[async_trait]
    impl PostRepository for BrokenPosts {
        async fn create(&self, _post: NewPost) -> Result<Post, DomainError> {
            Err(DomainError::Persistence("io".into()))
        }

        async fn list(&self, _filter: PostFilter) -> Result<Vec<Post>, DomainError> {
            if self.stall {
                tokio::time::sleep(Duration::from_secs(3600)).await;
            }
            Err(DomainError::Persistence("io".into()))
        }
    }

    #[tokio::test]
    async fn topic_lookup_failure_is_a_persistence_error() {
        let store = InMemoryStore::new();
        let topics: Arc<dyn TopicRepository> = Arc::new(UnreachableTopics);
        let posts: Arc<dyn PostRepository> = Arc::new(store);
        let service = TopicService::new(topics, posts, TIMEOUT);

        let err = service.get_topic_with_posts("feedback").await.unwrap_err();
        assert!(matches!(err, DomainError::Persistence(_)));

        let err = service
            .create_topic("Feedback".into(), None)
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::Persistence(_)));
    }

    #[tokio::test]
    async fn feed_failure_after_topic_resolves_is_a_persistence_error() {
        let store = InMemoryStore::new();
        let topics: Arc<dyn TopicRepository> = Arc::new(store);
        let posts: Arc<dyn PostRepository> = Arc::new(BrokenPosts { stall: false });
        let service = TopicService::new(topics, posts, TIMEOUT);

        service.create_topic("Feedback".into(), None).await.unwrap();

        let err = service.get_topic_with_posts("feedback").await.unwrap_err();
        assert!(matches!(err, DomainError::Persistence(_)));
    }

    #[tokio::test]
    async fn stalled_feed_fails_with_timeout() {
        let store = InMemoryStore::new();
        let topics: Arc<dyn TopicRepository> = Arc::new(store);
        let posts: Arc<dyn PostRepository> = Arc::new(BrokenPosts { stall: true });
        let service = TopicService::new(topics, posts, Duration::from_millis(20));

        service.create_topic("Feedback".into(), None).await.unwrap();

        let err = service.get_topic_with_posts("feedback").await.unwrap_err();
        assert!(matches!(err, DomainError::StoreTimeout(_)));
    }
}
