//! Error handling middleware - RFC 7807 compliant responses.

use actix_web::{HttpResponse, ResponseError, http::StatusCode};
use mediadesk_shared::ErrorResponse;
use std::fmt;

/// Application-level error type that converts to RFC 7807 responses.
#[derive(Debug)]
pub enum AppError {
    NotFound(String),
    BadRequest(String),
    Unauthorized,
    /// Mutating a locked post - forbidden with an explanatory message.
    Locked(String),
    Internal(String),
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::NotFound(msg) => write!(f, "Not found: {}", msg),
            AppError::BadRequest(msg) => write!(f, "Bad request: {}", msg),
            AppError::Unauthorized => write!(f, "Unauthorized"),
            AppError::Locked(msg) => write!(f, "Forbidden: {}", msg),
            AppError::Internal(msg) => write!(f, "Internal error: {}", msg),
        }
    }
}

impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::Unauthorized => StatusCode::UNAUTHORIZED,
            AppError::Locked(_) => StatusCode::FORBIDDEN,
            AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let error = match self {
            AppError::NotFound(detail) => ErrorResponse::not_found(detail),
            AppError::BadRequest(detail) => ErrorResponse::bad_request(detail),
            AppError::Unauthorized => ErrorResponse::unauthorized(),
            AppError::Locked(detail) => ErrorResponse::forbidden_with_detail(detail),
            AppError::Internal(detail) => {
                // Log internal errors; clients get a generic message.
                tracing::error!("Internal error: {}", detail);
                ErrorResponse::internal_error()
            }
        };

        HttpResponse::build(self.status_code()).json(error)
    }
}

// Conversion from domain and infrastructure errors
impl From<mediadesk_core::error::RepoError> for AppError {
    fn from(err: mediadesk_core::error::RepoError) -> Self {
        match err {
            mediadesk_core::error::RepoError::NotFound => {
                AppError::NotFound("Resource not found".to_string())
            }
            mediadesk_core::error::RepoError::Connection(msg)
            | mediadesk_core::error::RepoError::Query(msg) => {
                tracing::error!("Store error: {}", msg);
                AppError::Internal("Store error".to_string())
            }
        }
    }
}

impl From<mediadesk_core::pipeline::UploadError> for AppError {
    fn from(err: mediadesk_core::pipeline::UploadError) -> Self {
        use mediadesk_core::pipeline::UploadError;
        match err {
            // User-correctable, reported verbatim.
            UploadError::Validation(msg) => AppError::BadRequest(msg),
            UploadError::Transform(e) => AppError::BadRequest(e.to_string()),
            UploadError::Storage(e) => AppError::Internal(e.to_string()),
        }
    }
}

/// Result type alias for handlers.
pub type AppResult<T> = Result<T, AppError>;
