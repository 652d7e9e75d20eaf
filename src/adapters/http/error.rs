//! Error responses shared by every HTTP area.

use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};

use crate::domain::foundation::{DomainError, ErrorCode, ValidationError};

/// Standard error body: `{ "code": ..., "message": ... }`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub code: String,
    pub message: String,
}

impl ErrorResponse {
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
        }
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new("BAD_REQUEST", message)
    }

    pub fn unauthorized(message: impl Into<String>) -> Self {
        Self::new("UNAUTHORIZED", message)
    }

    pub fn forbidden(message: impl Into<String>) -> Self {
        Self::new("FORBIDDEN", message)
    }

    pub fn not_found(resource_type: &str, id: &str) -> Self {
        Self::new("NOT_FOUND", format!("{} not found: {}", resource_type, id))
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::new("INTERNAL_ERROR", message)
    }
}

/// Error returned by HTTP handlers, rendered as an [`ErrorResponse`].
#[derive(Debug, Clone, thiserror::Error)]
pub enum ApiError {
    #[error("{0}")]
    BadRequest(String),

    #[error("Authentication required")]
    Unauthorized,

    #[error("{0}")]
    Forbidden(String),

    #[error("{0}")]
    NotFound(String),

    /// Details are logged, never returned to the caller.
    #[error("Internal error: {0}")]
    Internal(String),
}

impl ApiError {
    pub fn not_found(resource: &str, id: impl std::fmt::Display) -> Self {
        ApiError::NotFound(format!("{} not found: {}", resource, id))
    }

    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::Unauthorized => StatusCode::UNAUTHORIZED,
            ApiError::Forbidden(_) => StatusCode::FORBIDDEN,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = match &self {
            ApiError::BadRequest(message) => ErrorResponse::bad_request(message.clone()),
            ApiError::Unauthorized => ErrorResponse::unauthorized("Authentication required"),
            ApiError::Forbidden(message) => ErrorResponse::forbidden(message.clone()),
            ApiError::NotFound(message) => ErrorResponse::new("NOT_FOUND", message.clone()),
            ApiError::Internal(detail) => {
                tracing::error!(error = %detail, "Request failed");
                ErrorResponse::internal("An unexpected error occurred")
            }
        };

        (self.status(), Json(body)).into_response()
    }
}

impl From<ValidationError> for ApiError {
    fn from(err: ValidationError) -> Self {
        ApiError::BadRequest(err.to_string())
    }
}

impl From<DomainError> for ApiError {
    fn from(err: DomainError) -> Self {
        match err.code {
            ErrorCode::ValidationFailed => ApiError::BadRequest(err.message),
            ErrorCode::Unauthorized => ApiError::Unauthorized,
            ErrorCode::Forbidden => ApiError::Forbidden(err.message),
            ErrorCode::StepNotFound
            | ErrorCode::UnitNotFound
            | ErrorCode::ModuleNotFound
            | ErrorCode::UserNotFound => ApiError::NotFound(err.message),
            ErrorCode::StorageUnavailable | ErrorCode::CacheError | ErrorCode::InternalError => {
                ApiError::Internal(err.message)
            }
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::BadRequest(rejection.body_text())
    }
}
