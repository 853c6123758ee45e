//! Shared error type for the plain-JSON model services (keyword extraction, course
//! recommendations). Calls are not retried.

use reqwest::Response;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("service returned status {status}: {message}")]
    Status { status: u16, message: String },
}

/// Turns a non-success response into `ServiceError::Status`, keeping a short
/// excerpt of the body for logs.
pub async fn ensure_success(response: Response) -> Result<Response, ServiceError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let body = response.text().await.unwrap_or_default();
    Err(ServiceError::Status {
        status: status.as_u16(),
        message: excerpt(&body),
    })
}

fn excerpt(body: &str) -> String {
    const MAX_CHARS: usize = 200;
    let trimmed = body.trim();
    if trimmed.chars().count() <= MAX_CHARS {
        trimmed.to_string()
    } else {
        let cut: String = trimmed.chars().take(MAX_CHARS).collect();
        format!("{cut}…")
    }
}
