//! Server error types
//!
//! - `ServerError`: startup and configuration failures
//! - `ApiError`: per-request failures, rendered as `{"error": ...}` JSON

use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};
use showcase_core::ShowcaseError;
use thiserror::Error;

/// Startup failures
#[derive(Debug, Error)]
pub enum ServerError {
    /// Socket or file I/O failed
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// Configuration file is invalid
    #[error("invalid configuration: {0}")]
    Config(#[from] toml::de::Error),

    /// Listen address is malformed
    #[error("invalid bind address '{0}'")]
    InvalidBind(String),

    /// Subscriber could not be installed
    #[error("failed to initialize logging: {0}")]
    Telemetry(String),
}

/// Request failures
#[derive(Debug, Error)]
pub enum ApiError {
    /// Demo component failed
    #[error(transparent)]
    Showcase(#[from] ShowcaseError),

    /// Request could not be decoded
    #[error("bad request: {0}")]
    BadRequest(String),
}

impl ApiError {
    /// HTTP status for this error
    #[must_use]
    pub fn status(&self) -> StatusCode {
        match self {
            Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::Showcase(err) if err.is_timeout() => StatusCode::GATEWAY_TIMEOUT,
            // Malformed numbers stay server errors
            Self::Showcase(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::warn!(error = %self, %status, "request failed");
        }

        let body = serde_json::json!({
            "error": self.to_string(),
        });

        (
            status,
            [(header::CONTENT_TYPE, "application/json")],
            serde_json::to_string(&body).unwrap_or_else(|_| "{\"error\":\"Internal error\"}".to_string()),
        )
            .into_response()
    }
}
