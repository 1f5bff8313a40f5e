pub mod post;
pub mod topic;

use crate::domain::error::DomainError;
use crate::presentation::middleware::RequestId;
use actix_web::{HttpMessage, HttpRequest, web};
use tracing::debug;

/// Malformed bodies get the same `{error}` shape as every other failure.
pub fn json_config() -> web::JsonConfig {
    web::JsonConfig::default().error_handler(|err, _req| {
        debug!(error = %err, "rejected request body");
        DomainError::validation("Request body must be valid JSON").into()
    })
}

pub fn query_config() -> web::QueryConfig {
    web::QueryConfig::default().error_handler(|err, _req| {
        debug!(error = %err, "rejected query string");
        DomainError::validation("Invalid query string").into()
    })
}

pub(crate) fn request_id(req: &HttpRequest) -> String {
    req.extensions()
        .get::<RequestId>()
        .map(|rid| rid.0.clone())
        .unwrap_or_else(|| "unknown".into())
}
