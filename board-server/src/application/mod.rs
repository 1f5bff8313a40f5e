pub mod post_service;
pub mod topic_service;

use crate::domain::error::DomainError;
use std::future::Future;
use std::time::Duration;
use tracing::error;

/// Runs one store call, failing with `StoreTimeout` once `limit` elapses.
pub(crate) async fn store_call<T, F>(limit: Duration, call: F) -> Result<T, DomainError>
where
    F: Future<Output = Result<T, DomainError>>,
{
    match tokio::time::timeout(limit, call).await {
        Ok(result) => result,
        Err(_) => {
            error!(timeout_ms = limit.as_millis(), "store call timed out");
            Err(DomainError::StoreTimeout(limit))
        }
    }
}
