//! Response types for the Payroll and Severance Engine API.
//!
//! This module defines the error response structures and the mapping from
//! engine errors onto HTTP status codes.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};

use crate::error::EngineError;

/// API error response structure.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiError {
    /// Error code for programmatic handling.
    pub code: String,
    /// Human-readable error message.
    pub message: String,
    /// Optional details about the error.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl ApiError {
    /// Creates a new API error.
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            details: None,
        }
    }

    /// Creates a new API error with details.
    pub fn with_details(
        code: impl Into<String>,
        message: impl Into<String>,
        details: impl Into<String>,
    ) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            details: Some(details.into()),
        }
    }
}

/// API error with HTTP status code.
pub struct ApiErrorResponse {
    /// The HTTP status code.
    pub status: StatusCode,
    /// The error body.
    pub error: ApiError,
}

impl IntoResponse for ApiErrorResponse {
    fn into_response(self) -> Response {
        (self.status, Json(self.error)).into_response()
    }
}

impl From<EngineError> for ApiErrorResponse {
    fn from(error: EngineError) -> Self {
        match error {
            EngineError::Validation { message } => ApiErrorResponse {
                status: StatusCode::BAD_REQUEST,
                error: ApiError::new("VALIDATION_ERROR", message),
            },
            EngineError::NotFound { message } => ApiErrorResponse {
                status: StatusCode::NOT_FOUND,
                error: ApiError::new("NOT_FOUND", message),
            },
            EngineError::Conflict { message } => ApiErrorResponse {
                status: StatusCode::CONFLICT,
                error: ApiError::new("CONFLICT", message),
            },
        }
    }
}
