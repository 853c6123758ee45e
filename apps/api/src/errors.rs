use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use serde_json::json;
use thiserror::Error;

/// A single field that failed validation, addressed by its dotted path
/// (e.g. `contactInfo.email`, `experience[0].endDate`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

impl FieldError {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

/// Application-level error type.
/// Implements `IntoResponse` so Axum handlers can return `Result<T, AppError>`.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Invalid fields: {} field(s) failed validation", .0.len())]
    InvalidFields(Vec<FieldError>),

    #[error("Unauthorized")]
    Unauthorized,

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("AI error: {0}")]
    Ai(String),

    #[error("Remote service error: {0}")]
    RemoteService(String),

    #[error("Internal server error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, "NOT_FOUND", msg.clone()),
            AppError::Validation(msg) => (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", msg.clone()),
            AppError::InvalidFields(fields) => (
                StatusCode::UNPROCESSABLE_ENTITY,
                "INVALID_FIELDS",
                format!("{} field(s) failed validation", fields.len()),
            ),
            AppError::Unauthorized => (
                StatusCode::UNAUTHORIZED,
                "UNAUTHORIZED",
                "Authentication required".to_string(),
            ),
            AppError::Database(e) => {
                tracing::error!("Database error: {e}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "DATABASE_ERROR",
                    "A database error occurred".to_string(),
                )
            }
            AppError::Ai(msg) => {
                tracing::error!("AI error: {msg}");
                (
                    StatusCode::BAD_GATEWAY,
                    "AI_ERROR",
                    "An AI processing error occurred".to_string(),
                )
            }
            AppError::RemoteService(msg) => {
                tracing::error!("Remote service error: {msg}");
                (StatusCode::BAD_GATEWAY, "REMOTE_SERVICE_ERROR", msg.clone())
            }
            AppError::Internal(e) => {
                tracing::error!("Internal error: {e:?}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "INTERNAL_ERROR",
                    "An internal server error occurred".to_string(),
                )
            }
        };

        let body = match &self {
            AppError::InvalidFields(fields) => json!({
                "error": {
                    "code": code,
                    "message": message,
                    "fields": fields,
                }
            }),
            _ => json!({
                "error": {
                    "code": code,
                    "message": message
                }
            }),
        };

        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unauthorized_maps_to_401() {
        let response = AppError::Unauthorized.into_response();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[test]
    fn test_invalid_fields_maps_to_422() {
        let err = AppError::InvalidFields(vec![FieldError::new("contactInfo.email", "Invalid email")]);
        assert_eq!(err.to_string(), "Invalid fields: 1 field(s) failed validation");
        assert_eq!(err.into_response().status(), StatusCode::UNPROCESSABLE_ENTITY);
    }

    #[test]
    fn test_remote_failures_map_to_bad_gateway() {
        let ai = AppError::Ai("boom".to_string()).into_response();
        let remote = AppError::RemoteService("Failed to generate keywords".to_string()).into_response();
        assert_eq!(ai.status(), StatusCode::BAD_GATEWAY);
        assert_eq!(remote.status(), StatusCode::BAD_GATEWAY);
    }
}
