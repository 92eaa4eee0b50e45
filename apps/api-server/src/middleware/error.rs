//! Error handling - maps request failures to HTTP responses.

use actix_web::{HttpResponse, ResponseError, http::StatusCode};
use thiserror::Error;

use inkwell_core::{RepoError, ValidationErrors};
use inkwell_shared::{ErrorResponse, ValidationErrorResponse};

/// Application-level error type.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Post not found")]
    NotFound,

    #[error("Validation failed: {0}")]
    Validation(ValidationErrors),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            AppError::NotFound => StatusCode::NOT_FOUND,
            AppError::Validation(_) => StatusCode::BAD_REQUEST,
            AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let mut response = HttpResponse::build(self.status_code());
        match self {
            AppError::NotFound => response.json(ErrorResponse::post_not_found()),
            AppError::Validation(errors) => {
                response.json(ValidationErrorResponse::from(errors.clone()))
            }
            AppError::Internal(detail) => {
                tracing::error!("Internal error: {}", detail);
                response.json(ErrorResponse::internal_error())
            }
        }
    }
}

impl From<ValidationErrors> for AppError {
    fn from(errors: ValidationErrors) -> Self {
        AppError::Validation(errors)
    }
}

impl From<RepoError> for AppError {
    fn from(err: RepoError) -> Self {
        match err {
            RepoError::NotFound => AppError::NotFound,
            RepoError::Connection(msg) => {
                AppError::Internal(format!("Database connection error: {}", msg))
            }
            RepoError::Query(msg) => AppError::Internal(format!("Database query error: {}", msg)),
        }
    }
}

/// Result type alias for handlers.
pub type AppResult<T> = Result<T, AppError>;
