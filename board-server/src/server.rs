use crate::application::post_service::PostService;
use crate::application::topic_service::TopicService;
use crate::data::memory_repository::InMemoryStore;
use crate::data::post_repository::{PostRepository, PostgresPostRepository};
use crate::data::topic_repository::{PostgresTopicRepository, TopicRepository};
use crate::infrastructure::config::{AppConfig, StoreBackend};
use crate::infrastructure::database::{create_pool, run_migrations};
use crate::presentation::dto::HealthResponse;
use crate::presentation::handlers;
use crate::presentation::middleware::{RequestIdMiddleware, TimingMiddleware};
use actix_cors::Cors;
use actix_web::middleware::DefaultHeaders;
use actix_web::{App, HttpResponse, HttpServer, Responder, web};
use anyhow::Context;
use chrono::Utc;
use std::sync::Arc;
use tracing::info;

#[derive(Clone)]
pub struct Services {
    pub topics: TopicService,
    pub posts: PostService,
}

impl Services {
    pub fn new(
        topics: Arc<dyn TopicRepository>,
        posts: Arc<dyn PostRepository>,
        config: &AppConfig,
    ) -> Self {
        Self {
            topics: TopicService::new(topics, Arc::clone(&posts), config.store_timeout),
            posts: PostService::new(posts, config.feed_scope, config.store_timeout),
        }
    }

    /// Both services over one shared in-memory store.
    pub fn in_memory(config: &AppConfig) -> Self {
        let store = InMemoryStore::new();
        Self::new(Arc::new(store.clone()), Arc::new(store), config)
    }
}

pub async fn build_services(config: &AppConfig) -> anyhow::Result<Services> {
    match config.store_backend {
        StoreBackend::Memory => {
            info!("using in-memory store; data is lost on shutdown");
            Ok(Services::in_memory(config))
        }
        StoreBackend::Postgres => {
            let database_url = config
                .database_url
                .as_deref()
                .context("DATABASE_URL must be set when STORE_BACKEND is postgres")?;
            let pool = create_pool(database_url, config.database_max_connections)
                .await
                .context("failed to connect to database")?;
            run_migrations(&pool)
                .await
                .context("failed to run migrations")?;

            Ok(Services::new(
                Arc::new(PostgresTopicRepository::new(pool.clone())),
                Arc::new(PostgresPostRepository::new(pool)),
                config,
            ))
        }
    }
}

/// Registers services, extractor configs and every `/api` route. Shared by
/// the real server and the HTTP tests.
pub fn configure_api(cfg: &mut web::ServiceConfig, services: &Services) {
    cfg.app_data(web::Data::new(services.topics.clone()))
        .app_data(web::Data::new(services.posts.clone()))
        .app_data(handlers::json_config())
        .app_data(handlers::query_config())
        .service(
            web::scope("/api")
                .route("/health", web::get().to(health))
                .service(handlers::post::list_posts)
                .service(handlers::post::create_post)
                .service(handlers::topic::get_topic)
                .service(handlers::topic::create_topic_post)
                .service(handlers::topic::create_topic),
        );
}

pub async fn start_rest_server(config: AppConfig, services: Services) -> anyhow::Result<()> {
    let bind_address = (config.host.clone(), config.port);

    info!(
        host = %bind_address.0,
        port = bind_address.1,
        feed_scope = ?services.posts.feed_scope(),
        "HTTP server starting"
    );

    HttpServer::new(move || {
        let cors = build_cors(&config);

        App::new()
            .wrap(TimingMiddleware)
            .wrap(RequestIdMiddleware)
            .wrap(
                DefaultHeaders::new()
                    .add(("X-Content-Type-Options", "nosniff"))
                    .add(("Referrer-Policy", "no-referrer"))
                    .add(("Permissions-Policy", "geolocation=()"))
                    .add(("Cross-Origin-Opener-Policy", "same-origin")),
            )
            .wrap(cors)
            .configure(|cfg| configure_api(cfg, &services))
    })
    .bind(bind_address)?
    .run()
    .await
    .map_err(anyhow::Error::new)?;

    info!("HTTP server stopped");
    Ok(())
}

fn build_cors(config: &AppConfig) -> Cors {
    let mut cors = Cors::default()
        .allowed_methods(vec!["GET", "POST"])
        .allowed_headers(vec![actix_web::http::header::CONTENT_TYPE])
        .expose_headers(vec!["x-request-id"])
        .max_age(3600);

    for origin in &config.cors_origins {
        if origin == "*" {
            cors = cors.allow_any_origin();
        } else {
            cors = cors.allowed_origin(origin);
        }
    }

    cors
}

async fn health() -> impl Responder {
    HttpResponse::Ok().json(HealthResponse {
        status: "ok",
        timestamp: Utc::now(),
    })
}
