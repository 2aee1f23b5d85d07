//! Error types and HTTP error response handling.
//!
//! This module defines all application errors and how they are converted
//! into HTTP responses with appropriate status codes and JSON bodies.

use crate::services::actuator::ActuationError;
use axum::{
    Json,
    http::{HeaderValue, StatusCode, header},
    response::{IntoResponse, Response},
};
use serde_json::json;
use std::time::Duration;

/// Application-wide error type.
///
/// Each variant maps to a specific HTTP status code and error message.
/// None of them carry a pin-state side effect except `Actuation`, which is
/// only produced after the request reached the hardware.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// Credentials are missing, malformed or wrong.
    ///
    /// Returns HTTP 401 Unauthorized. The message never says which field was wrong.
    #[error("Invalid authentication credentials.")]
    Unauthorized,

    /// The route group's rate-limit window is exhausted.
    ///
    /// Returns HTTP 429 Too Many Requests with a `Retry-After` header.
    #[error("Rate limit exceeded")]
    RateLimited { retry_after: Duration },

    /// Driving the pin failed (or no driver is available).
    ///
    /// Returns HTTP 500. Details are logged, never sent to the client.
    #[error("GPIO activation error")]
    Actuation(#[from] ActuationError),

    /// The blocking activation task did not finish normally.
    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<tokio::task::JoinError> for AppError {
    fn from(err: tokio::task::JoinError) -> Self {
        AppError::Internal(err.to_string())
    }
}

/// Convert AppError into an HTTP response.
///
/// # Response Format
///
/// All errors return JSON in this format:
/// ```json
/// {
///   "error": {
///     "code": "error_type",
///     "message": "Human-readable error message"
///   }
/// }
/// ```
///
/// # Status Code Mapping
///
/// - `Unauthorized` → 401 Unauthorized (+ `WWW-Authenticate: Basic`)
/// - `RateLimited` → 429 Too Many Requests (+ `Retry-After`)
/// - `Actuation` → 500 Internal Server Error
/// - `Internal` → 500 Internal Server Error (hides details from client)
impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            AppError::Unauthorized => (StatusCode::UNAUTHORIZED, "unauthorized", self.to_string()),
            AppError::RateLimited { .. } => (
                StatusCode::TOO_MANY_REQUESTS,
                "rate_limited",
                self.to_string(),
            ),
            AppError::Actuation(err) => {
                tracing::error!("Error activating GPIO: {}", err);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "gpio_error",
                    self.to_string(),
                )
            }
            AppError::Internal(detail) => {
                tracing::error!("Internal error: {}", detail);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "internal_error",
                    "An internal error occurred".to_string(),
                )
            }
        };

        let body = Json(json!({
            "error": {
                "code": code,
                "message": message
            }
        }));

        let mut response = (status, body).into_response();

        match self {
            AppError::Unauthorized => {
                response.headers_mut().insert(
                    header::WWW_AUTHENTICATE,
                    HeaderValue::from_static("Basic realm=\"remote-start\""),
                );
            }
            AppError::RateLimited { retry_after } => {
                // Whole seconds, rounded up
                let secs = retry_after.as_secs() + u64::from(retry_after.subsec_nanos() > 0);
                response
                    .headers_mut()
                    .insert(header::RETRY_AFTER, HeaderValue::from(secs.max(1)));
            }
            _ => {}
        }

        response
    }
}
