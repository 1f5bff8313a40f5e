use crate::application::post_service::PostService;
use crate::domain::error::DomainError;
use crate::presentation::dto::CreatePostRequest;
use crate::presentation::handlers::request_id;
use actix_web::{HttpRequest, HttpResponse, get, post, web};
use tracing::info;

#[get("/posts")]
pub async fn list_posts(
    req: HttpRequest,
    service: web::Data<PostService>,
) -> Result<HttpResponse, DomainError> {
    let posts = service.list_global_posts().await?;

    info!(
        request_id = %request_id(&req),
        count = posts.len(),
        "posts retrieved"
    );

    Ok(HttpResponse::Ok().json(posts))
}

#[post("/posts")]
pub async fn create_post(
    req: HttpRequest,
    service: web::Data<PostService>,
    payload: web::Json<CreatePostRequest>,
) -> Result<HttpResponse, DomainError> {
    let CreatePostRequest { title, content } = payload.into_inner();
    let post = service
        .create_global_post(title.unwrap_or_default(), content.unwrap_or_default())
        .await?;

    info!(
        request_id = %request_id(&req),
        post_id = %post.id,
        "post created"
    );

    Ok(HttpResponse::Created().json(post))
}
