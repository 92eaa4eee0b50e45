//! Error response bodies.

use serde::{Deserialize, Serialize};

use inkwell_core::ValidationErrors;

pub const POST_NOT_FOUND: &str = "Post not found.";
pub const INTERNAL_ERROR: &str = "Internal server error.";
pub const INVALID_HOST: &str = "Invalid host header.";

/// `{"error": "..."}` - a single message for the whole request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
        }
    }

    pub fn post_not_found() -> Self {
        Self::new(POST_NOT_FOUND)
    }

    pub fn internal_error() -> Self {
        Self::new(INTERNAL_ERROR)
    }

    pub fn invalid_host() -> Self {
        Self::new(INVALID_HOST)
    }
}

/// `{"errors": {field: [messages]}}` - payload validation failures.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationErrorResponse {
    pub errors: ValidationErrors,
}

impl From<ValidationErrors> for ValidationErrorResponse {
    fn from(errors: ValidationErrors) -> Self {
        Self { errors }
    }
}
