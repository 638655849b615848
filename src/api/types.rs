use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;

use super::validation::FieldIssue;

/// Body of every response: `{data?, message?, error?, code}`.
#[derive(Debug, Serialize)]
pub struct ApiResponse<T> {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<ErrorBody>,
    pub code: u16,
}

/// A plain message, or the per-field issues of a rejected body.
#[derive(Debug, Serialize)]
#[serde(untagged)]
pub enum ErrorBody {
    Message(String),
    Fields(Vec<FieldIssue>),
}

impl<T> ApiResponse<T> {
    pub const fn success(data: T) -> Self {
        Self {
            data: Some(data),
            message: None,
            error: None,
            code: 200,
        }
    }

    pub fn created(message: impl Into<String>, data: T) -> Self {
        Self {
            data: Some(data),
            message: Some(message.into()),
            error: None,
            code: 201,
        }
    }

    pub fn with_message(message: impl Into<String>, data: T) -> Self {
        Self {
            data: Some(data),
            message: Some(message.into()),
            error: None,
            code: 200,
        }
    }
}

impl ApiResponse<()> {
    pub fn message(message: impl Into<String>) -> Self {
        Self {
            data: None,
            message: Some(message.into()),
            error: None,
            code: 200,
        }
    }

    pub fn error(status: StatusCode, error: ErrorBody) -> Self {
        Self {
            data: None,
            message: None,
            error: Some(error),
            code: status.as_u16(),
        }
    }
}

impl<T: Serialize> IntoResponse for ApiResponse<T> {
    fn into_response(self) -> Response {
        let status = StatusCode::from_u16(self.code).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        (status, Json(self)).into_response()
    }
}

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub database: bool,
    pub version: &'static str,
    pub uptime_seconds: u64,
}
