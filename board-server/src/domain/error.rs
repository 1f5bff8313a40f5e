use actix_web::{HttpResponse, ResponseError, http::StatusCode};
use serde::Serialize;
use std::time::Duration;
use thiserror::Error;
use tracing::error;

#[derive(Debug, Error)]
pub enum DomainError {
    #[error("{0}")]
    Validation(String),
    #[error("topic not found: {0}")]
    TopicNotFound(String),
    #[error("slug {slug} matches {count} topics")]
    SlugConflict { slug: String, count: usize },
    #[error("store error: {0}")]
    Persistence(String),
    #[error("store call timed out after {0:?}")]
    StoreTimeout(Duration),
}

impl DomainError {
    pub fn validation(message: impl Into<String>) -> Self {
        DomainError::Validation(message.into())
    }

    /// The message a client is allowed to see. Store details stay in the logs.
    pub fn public_message(&self) -> &str {
        match self {
            DomainError::Validation(message) => message,
            DomainError::TopicNotFound(_) => "Topic not found",
            DomainError::SlugConflict { .. } => "Topic link is ambiguous",
            DomainError::Persistence(_) | DomainError::StoreTimeout(_) => "Internal server error",
        }
    }
}

impl From<sqlx::Error> for DomainError {
    fn from(err: sqlx::Error) -> Self {
        DomainError::Persistence(err.to_string())
    }
}

#[derive(Debug, Serialize)]
pub struct ErrorBody<'a> {
    pub error: &'a str,
}

impl ResponseError for DomainError {
    fn status_code(&self) -> StatusCode {
        match self {
            DomainError::Validation(_) => StatusCode::BAD_REQUEST,
            DomainError::TopicNotFound(_) => StatusCode::NOT_FOUND,
            DomainError::SlugConflict { .. } => StatusCode::CONFLICT,
            DomainError::Persistence(_) | DomainError::StoreTimeout(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    fn error_response(&self) -> HttpResponse {
        let status = self.status_code();
        if status.is_server_error() || status == StatusCode::CONFLICT {
            error!(error = %self, status = status.as_u16(), "request failed");
        }
        HttpResponse::build(status).json(ErrorBody {
            error: self.public_message(),
        })
    }
}
