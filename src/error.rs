//! Error types for CourseHub
//!
//! All errors in the application are converted to `AppError`,
//! which implements `IntoResponse` for proper HTTP error responses.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use thiserror::Error;

use crate::auth::{AuthFailure, AuthorizationFailure};
use crate::data::StoreError;

/// Body message for every 401 response
pub const ACCESS_DENIED_MESSAGE: &str = "Access Denied";

/// Body message for 404 responses on course routes
pub const COURSE_NOT_FOUND_MESSAGE: &str = "Course not found";

/// Body message for unmatched routes
pub const ROUTE_NOT_FOUND_MESSAGE: &str = "Route Not Found";

const INTERNAL_ERROR_MESSAGE: &str = "Internal server error";

/// Application-wide error type
///
/// This enum represents all possible errors that can occur
/// in the application. It implements `IntoResponse` to
/// automatically convert errors to appropriate HTTP responses.
#[derive(Debug, Error)]
pub enum AppError {
    /// Resource not found (404)
    #[error("{0}")]
    NotFound(&'static str),

    /// Authentication failed (401)
    #[error("Authentication failed: {0}")]
    Unauthorized(#[from] AuthFailure),

    /// Authenticated caller may not perform the operation (403)
    #[error("Access denied: {0}")]
    Forbidden(#[from] AuthorizationFailure),

    /// Validation or uniqueness error (400)
    #[error("Validation error: {}", .0.join(", "))]
    Validation(Vec<String>),

    /// Database error (500)
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Configuration error (500)
    #[error("Configuration error: {0}")]
    Config(String),

    /// Internal server error (500)
    #[error("Internal error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl AppError {
    /// Not-found error for course routes
    pub fn course_not_found() -> Self {
        AppError::NotFound(COURSE_NOT_FOUND_MESSAGE)
    }

    /// Short label used for the `error_type` metric
    pub fn error_type(&self) -> &'static str {
        match self {
            AppError::NotFound(_) => "not_found",
            AppError::Unauthorized(_) => "unauthorized",
            AppError::Forbidden(_) => "forbidden",
            AppError::Validation(_) => "validation",
            AppError::Database(_) => "database",
            AppError::Config(_) => "config",
            AppError::Internal(_) => "internal",
        }
    }
}

impl From<StoreError> for AppError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::Validation(messages) | StoreError::UniqueConstraint(messages) => {
                AppError::Validation(messages)
            }
            StoreError::Database(e) => AppError::Database(e),
        }
    }
}

impl From<config::ConfigError> for AppError {
    fn from(err: config::ConfigError) -> Self {
        AppError::Config(err.to_string())
    }
}

impl From<axum::extract::rejection::JsonRejection> for AppError {
    fn from(rejection: axum::extract::rejection::JsonRejection) -> Self {
        AppError::Validation(vec![rejection.body_text()])
    }
}

/// Detail of a 500 response, attached to the response extensions
///
/// Read by the response-observing middleware when global error logging
/// is enabled. Never serialized into the response body.
#[derive(Debug, Clone)]
pub struct ServerErrorDetail(pub String);

impl IntoResponse for AppError {
    /// Convert error to HTTP response
    ///
    /// Maps each error variant to appropriate HTTP status code
    /// and JSON error body.
    fn into_response(self) -> Response {
        use axum::Json;

        crate::metrics::ERRORS_TOTAL
            .with_label_values(&[self.error_type()])
            .inc();

        match &self {
            AppError::Validation(messages) => (
                StatusCode::BAD_REQUEST,
                Json(serde_json::json!({ "errors": messages })),
            )
                .into_response(),
            AppError::Unauthorized(_) => (
                StatusCode::UNAUTHORIZED,
                Json(serde_json::json!({ "message": ACCESS_DENIED_MESSAGE })),
            )
                .into_response(),
            AppError::Forbidden(failure) => (
                StatusCode::FORBIDDEN,
                Json(serde_json::json!({ "message": failure.to_string() })),
            )
                .into_response(),
            AppError::NotFound(message) => (
                StatusCode::NOT_FOUND,
                Json(serde_json::json!({ "message": message })),
            )
                .into_response(),
            AppError::Database(_) | AppError::Config(_) | AppError::Internal(_) => {
                let mut response = (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(serde_json::json!({
                        "message": INTERNAL_ERROR_MESSAGE,
                        "error": {},
                    })),
                )
                    .into_response();
                response
                    .extensions_mut()
                    .insert(ServerErrorDetail(format!("{self:?}")));
                response
            }
        }
    }
}

/// Result type alias using AppError
pub type Result<T> = std::result::Result<T, AppError>;
