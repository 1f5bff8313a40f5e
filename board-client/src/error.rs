use serde::Deserialize;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum BoardClientError {
    #[error("Request error: {0}")]
    RequestError(#[from] reqwest::Error),
    #[error("Invalid request: {0}")]
    InvalidRequest(String),
    #[error("Not found: {0}")]
    NotFound(String),
    #[error("Conflict: {0}")]
    Conflict(String),
    #[error("Server error ({status}): {message}")]
    ServerError { status: u16, message: String },
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    error: String,
}

impl BoardClientError {
    pub fn from_status(status: u16, message: String) -> Self {
        match status {
            400 => BoardClientError::InvalidRequest(message),
            404 => BoardClientError::NotFound(message),
            409 => BoardClientError::Conflict(message),
            _ => BoardClientError::ServerError { status, message },
        }
    }

    /// Turns a non-2xx response into an error, keeping the server's
    /// `error` message when the body has one.
    pub async fn from_http_response(resp: reqwest::Response) -> Self {
        let status = resp.status();
        let message = match resp.text().await {
            Ok(text) => serde_json::from_str::<ErrorBody>(&text)
                .map(|body| body.error)
                .unwrap_or_else(|_| {
                    if text.trim().is_empty() {
                        status.canonical_reason().unwrap_or("unknown error").to_owned()
                    } else {
                        text
                    }
                }),
            Err(err) => return BoardClientError::RequestError(err),
        };
        Self::from_status(status.as_u16(), message)
    }
}
