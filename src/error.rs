//! Error types for the book review service
//!
//! Provides unified error handling using thiserror. Only `AppError` ever
//! reaches an HTTP caller; cache failures are recovered where they happen.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;
use tracing::error;

use crate::models::ErrorResponse;

// == Store Error Enum ==
/// Failure raised by the persistent store.
#[derive(Error, Debug)]
pub enum StoreError {
    /// Query or connection failure in the database
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Schema migration failed at startup
    #[error("Migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),
}

// == Cache Error Enum ==
/// Failure raised by a cache backend.
///
/// Callers treat every variant as a miss (reads) or a no-op (writes).
#[derive(Error, Debug)]
pub enum CacheError {
    /// The backend rejected the command or the connection dropped
    #[error("Cache backend error: {0}")]
    Backend(#[from] redis::RedisError),

    /// The backend did not answer within the configured timeout
    #[error("Cache operation timed out")]
    Timeout,

    /// A cached value could not be (de)serialized
    #[error("Corrupt cache value: {0}")]
    Corrupt(#[from] serde_json::Error),

    /// The backend recently failed and is skipped until its retry window ends
    #[error("Cache backend is down, retry pending")]
    Down,
}

// == App Error Enum ==
/// Error type returned by the HTTP handlers.
#[derive(Error, Debug)]
pub enum AppError {
    /// Missing or empty required field, or an unreadable request body
    #[error("{0}")]
    Validation(String),

    /// The store failed while serving the request
    #[error(transparent)]
    Store(#[from] StoreError),
}

// == IntoResponse Implementation ==
impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            AppError::Validation(msg) => (StatusCode::BAD_REQUEST, msg.clone()),
            AppError::Store(err) => {
                error!("Store failure: {}", err);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal server error".to_string(),
                )
            }
        };

        let body = Json(ErrorResponse::new(status, message));

        (status, body).into_response()
    }
}

// == Result Type Alias ==
/// Convenience Result type for the HTTP handlers.
pub type Result<T> = std::result::Result<T, AppError>;
