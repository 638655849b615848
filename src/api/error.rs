use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use std::fmt;

use super::types::{ApiResponse, ErrorBody};
use super::validation::FieldIssue;
use crate::domain::CatalogError;

#[derive(Debug)]
pub enum ApiError {
    Validation(Vec<FieldIssue>),

    BadRequest(String),

    NotFound(String),

    Conflict(String),

    DatabaseError(String),

    StorageError(String),

    PayloadTooLarge(String),

    Unauthorized(String),

    InternalError(String),
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Validation(issues) => {
                let fields: Vec<&str> = issues.iter().map(|i| i.field.as_str()).collect();
                write!(f, "Validation error: {}", fields.join(", "))
            }
            Self::BadRequest(msg) => write!(f, "Bad request: {msg}"),
            Self::NotFound(msg) => write!(f, "Not found: {msg}"),
            Self::Conflict(msg) => write!(f, "Conflict: {msg}"),
            Self::DatabaseError(msg) => write!(f, "Database error: {msg}"),
            Self::StorageError(msg) => write!(f, "Storage error: {msg}"),
            Self::PayloadTooLarge(msg) => write!(f, "Payload too large: {msg}"),
            Self::Unauthorized(msg) => write!(f, "Unauthorized: {msg}"),
            Self::InternalError(msg) => write!(f, "Internal error: {msg}"),
        }
    }
}

impl std::error::Error for ApiError {}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, error) = match self {
            Self::Validation(issues) => (StatusCode::BAD_REQUEST, ErrorBody::Fields(issues)),
            Self::BadRequest(msg) => (StatusCode::BAD_REQUEST, ErrorBody::Message(msg)),
            Self::NotFound(msg) => (StatusCode::NOT_FOUND, ErrorBody::Message(msg)),
            Self::Conflict(msg) => (StatusCode::CONFLICT, ErrorBody::Message(msg)),
            Self::DatabaseError(msg) => {
                tracing::error!("Database error: {}", msg);
                (StatusCode::INTERNAL_SERVER_ERROR, ErrorBody::Message(msg))
            }
            Self::StorageError(msg) => {
                tracing::error!("Storage error: {}", msg);
                (StatusCode::INTERNAL_SERVER_ERROR, ErrorBody::Message(msg))
            }
            Self::PayloadTooLarge(msg) => (StatusCode::PAYLOAD_TOO_LARGE, ErrorBody::Message(msg)),
            Self::Unauthorized(msg) => (StatusCode::UNAUTHORIZED, ErrorBody::Message(msg)),
            Self::InternalError(msg) => {
                tracing::error!("Internal error: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ErrorBody::Message("An internal error occurred".to_string()),
                )
            }
        };

        ApiResponse::<()>::error(status, error).into_response()
    }
}

impl From<CatalogError> for ApiError {
    fn from(err: CatalogError) -> Self {
        let message = err.to_string();
        match err {
            CatalogError::NotFound { .. } => Self::NotFound(message),
            CatalogError::MissingAssociation { .. } => Self::BadRequest(message),
            CatalogError::Conflict(_) => Self::Conflict(message),
            CatalogError::Database(_) => Self::DatabaseError(message),
            CatalogError::Storage(_) => Self::StorageError(message),
        }
    }
}

impl From<anyhow::Error> for ApiError {
    fn from(err: anyhow::Error) -> Self {
        Self::InternalError(err.to_string())
    }
}

impl ApiError {
    pub fn validation(issues: Vec<FieldIssue>) -> Self {
        Self::Validation(issues)
    }

    pub fn bad_request(msg: impl Into<String>) -> Self {
        Self::BadRequest(msg.into())
    }

    pub fn unauthorized() -> Self {
        Self::Unauthorized("Unauthorized".to_string())
    }

    pub fn internal(msg: impl Into<String>) -> Self {
        Self::InternalError(msg.into())
    }
}
