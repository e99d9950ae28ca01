//! # Error Handling Middleware
//!
//! Maps domain errors onto HTTP status codes and JSON error bodies so
//! every endpoint fails the same way. Capacity and conflict rejections
//! are client-visible 409s; storage failures are opaque 500s, and the
//! API fails closed: a storage error never reads as "slots available".

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use trailbook_core::errors::TrailError;

/// Application error wrapper that provides HTTP status code mapping.
///
/// `AppError` wraps domain-specific `TrailError` instances and implements
/// `IntoResponse` to convert them into HTTP responses with appropriate
/// status codes and JSON payloads.
#[derive(Debug)]
pub struct AppError(pub TrailError);

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        // Map error types to HTTP status codes
        let status = match &self.0 {
            TrailError::NotFound(_) => StatusCode::NOT_FOUND,
            TrailError::Validation(_) => StatusCode::BAD_REQUEST,
            TrailError::CapacityExceeded(_) => StatusCode::CONFLICT,
            TrailError::AlreadyBooked(_) => StatusCode::CONFLICT,
            TrailError::Conflict(_) => StatusCode::CONFLICT,
            TrailError::Authorization(_) => StatusCode::FORBIDDEN,
            TrailError::Database(_) => StatusCode::INTERNAL_SERVER_ERROR,
            TrailError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        // Get the error message and format as JSON
        let message = self.0.to_string();
        let body = Json(json!({ "error": message }));

        // Combine status code and JSON body into a response
        (status, body).into_response()
    }
}

/// Allows using the `?` operator with functions returning
/// `Result<T, TrailError>` inside handlers returning `Result<T, AppError>`.
impl From<TrailError> for AppError {
    fn from(err: TrailError) -> Self {
        AppError(err)
    }
}

/// Wraps raw repository errors in the database variant.
impl From<eyre::Report> for AppError {
    fn from(err: eyre::Report) -> Self {
        AppError(TrailError::Database(err))
    }
}
