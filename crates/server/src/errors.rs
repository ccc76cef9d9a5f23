use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use service::errors::ServiceError;
use thiserror::Error;
use tracing::error;

/// Error body returned by every handler: `{"error": <title>, "message": <detail>}`.
#[derive(Debug)]
pub struct ApiError {
    status: StatusCode,
    title: &'static str,
    message: String,
}

impl ApiError {
    pub fn new(status: StatusCode, title: &'static str, message: impl Into<String>) -> Self {
        Self { status, title, message: message.into() }
    }

    pub fn unauthenticated() -> Self {
        Self::new(StatusCode::UNAUTHORIZED, "Unauthorized", "missing caller identity")
    }

    pub fn status(&self) -> StatusCode { self.status }
}

impl From<ServiceError> for ApiError {
    fn from(err: ServiceError) -> Self {
        match err {
            ServiceError::Validation(m) => Self::new(StatusCode::BAD_REQUEST, "Validation Error", m),
            // Lost races and duplicate likes are reported as client errors.
            ServiceError::Conflict(m) => Self::new(StatusCode::BAD_REQUEST, "Conflict", m),
            ServiceError::NotFound(m) => Self::new(StatusCode::NOT_FOUND, "Not Found", m),
            ServiceError::Unauthorized(m) => Self::new(StatusCode::UNAUTHORIZED, "Unauthorized", m),
            ServiceError::Store(_) | ServiceError::Model(_) => {
                error!(code = err.code(), error = %err, "request failed on storage");
                Self::new(StatusCode::INTERNAL_SERVER_ERROR, "Internal Server Error", "internal error")
            }
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = serde_json::json!({ "error": self.title, "message": self.message });
        (self.status, Json(body)).into_response()
    }
}

#[derive(Debug, Error)]
pub enum StartupError {
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
    #[error("runtime check failed: {0}")]
    Runtime(String),
    #[error(transparent)]
    Any(#[from] anyhow::Error),
}
