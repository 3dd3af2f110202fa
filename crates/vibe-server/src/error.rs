//! JSON error responses

use axum::Json;
use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use tracing::error;

/// Error body shared by every non-success response
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ErrorBody {
    pub error: String,
    pub code: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
    /// Unix millis
    pub timestamp: i64,
}

/// An error that renders as `{error, code, details, timestamp}`
#[derive(Debug)]
pub struct ApiError {
    status: StatusCode,
    body: ErrorBody,
}

impl ApiError {
    pub fn new(status: StatusCode, error: impl Into<String>, code: &'static str) -> Self {
        Self {
            status,
            body: ErrorBody {
                error: error.into(),
                code,
                details: None,
                timestamp: chrono::Utc::now().timestamp_millis(),
            },
        }
    }

    pub fn with_details(mut self, details: impl Into<String>) -> Self {
        self.body.details = Some(details.into());
        self
    }

    /// 400 for a request that is missing required fields
    pub fn missing_fields(details: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, "Missing required fields", "INVALID_REQUEST")
            .with_details(details)
    }

    /// 400 for a request that failed validation
    pub fn invalid(details: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, "Invalid request", "INVALID_REQUEST")
            .with_details(details)
    }

    /// 404 for an unknown route
    pub fn not_found(method: &str, path: &str) -> Self {
        Self::new(StatusCode::NOT_FOUND, "Not Found", "NOT_FOUND")
            .with_details(format!("Endpoint {method} {path} not found"))
    }

    /// 500
    pub fn internal(details: impl Into<String>) -> Self {
        Self::new(
            StatusCode::INTERNAL_SERVER_ERROR,
            "Internal Server Error",
            "INTERNAL_ERROR",
        )
        .with_details(details)
    }

    pub fn status(&self) -> StatusCode {
        self.status
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status, Json(self.body)).into_response()
    }
}

impl From<vibe_core::Error> for ApiError {
    fn from(err: vibe_core::Error) -> Self {
        match err {
            vibe_core::Error::Validation(details) => Self::invalid(details),
            other => {
                error!("Analysis failed: {other}");
                Self::internal(other.to_string())
            }
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        Self::invalid(rejection.body_text())
    }
}
