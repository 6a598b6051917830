use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;

/// Application-level error type for HTTP handlers.
///
/// Implements [`IntoResponse`] to produce the JSON error bodies the
/// frontend consumes. That contract is uneven: recipe aggregate
/// endpoints surface a `message` field on 404, while step, ingredient,
/// and image endpoints surface `error` instead.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// Missing recipe; 404 with `{"message": ...}`.
    #[error("{0}")]
    NotFound(String),

    /// Missing step/ingredient/association/image; 404 with
    /// `{"error": ...}`.
    #[error("{0}")]
    ResourceNotFound(String),

    /// Malformed request body; 400 with `{"error": ...}`.
    #[error("{0}")]
    Validation(String),

    /// Database failure on a path that reports the operation it was
    /// performing plus the raw driver text; 500 with
    /// `{"error": context, "details": ...}`.
    #[error("{context}: {source}")]
    Storage {
        context: &'static str,
        source: sqlx::Error,
    },

    /// Any other database failure; 500 with a sanitized body.
    #[error(transparent)]
    Database(#[from] sqlx::Error),
}

/// Convenience type alias for handler return values.
pub type AppResult<T> = Result<T, AppError>;

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        match self {
            AppError::NotFound(message) => {
                (StatusCode::NOT_FOUND, Json(json!({ "message": message }))).into_response()
            }
            AppError::ResourceNotFound(message) => {
                (StatusCode::NOT_FOUND, Json(json!({ "error": message }))).into_response()
            }
            AppError::Validation(message) => {
                (StatusCode::BAD_REQUEST, Json(json!({ "error": message }))).into_response()
            }
            AppError::Storage { context, source } => {
                tracing::error!(error = %source, context, "Database error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(json!({ "error": context, "details": source.to_string() })),
                )
                    .into_response()
            }
            AppError::Database(err) => {
                tracing::error!(error = %err, "Database error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(json!({ "error": "Internal server error" })),
                )
                    .into_response()
            }
        }
    }
}
