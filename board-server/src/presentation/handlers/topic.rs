use crate::application::post_service::PostService;
use crate::application::topic_service::TopicService;
use crate::domain::error::DomainError;
use crate::presentation::dto::{CreateTopicPostRequest, CreateTopicRequest, TopicQuery};
use crate::presentation::handlers::request_id;
use actix_web::{HttpRequest, HttpResponse, get, post, web};
use tracing::info;

#[get("/topic")]
pub async fn get_topic(
    req: HttpRequest,
    service: web::Data<TopicService>,
    query: web::Query<TopicQuery>,
) -> Result<HttpResponse, DomainError> {
    let slug = query.into_inner().slug.unwrap_or_default();
    let resolved = service.get_topic_with_posts(&slug).await?;

    info!(
        request_id = %request_id(&req),
        topic_id = %resolved.topic.id,
        posts = resolved.posts.len(),
        "topic retrieved"
    );

    Ok(HttpResponse::Ok().json(resolved))
}

#[post("/topic")]
pub async fn create_topic_post(
    req: HttpRequest,
    service: web::Data<PostService>,
    payload: web::Json<CreateTopicPostRequest>,
) -> Result<HttpResponse, DomainError> {
    let CreateTopicPostRequest { content, topic_id } = payload.into_inner();
    let post = service
        .create_topic_post(
            content.unwrap_or_default(),
            topic_id.as_deref().unwrap_or_default(),
        )
        .await?;

    info!(
        request_id = %request_id(&req),
        post_id = %post.id,
        "topic post created"
    );

    Ok(HttpResponse::Created().json(post))
}

#[post("/topics")]
pub async fn create_topic(
    req: HttpRequest,
    service: web::Data<TopicService>,
    payload: web::Json<CreateTopicRequest>,
) -> Result<HttpResponse, DomainError> {
    let CreateTopicRequest { title, description } = payload.into_inner();
    let topic = service
        .create_topic(title.unwrap_or_default(), description)
        .await?;

    info!(
        request_id = %request_id(&req),
        topic_id = %topic.id,
        slug = %topic.slug,
        "topic created"
    );

    Ok(HttpResponse::Created().json(topic))
}
