//! Error types and response handling for forwarded requests.
//!
//! Provides structured error classification, HTTP status code mapping,
//! and JSON error response generation.

use std::time::Duration;

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use thiserror::Error;

/// Errors that can occur while proxying a request.
#[derive(Debug, Error)]
pub enum ProxyError {
    /// No backend is registered for the requested path.
    #[error("no route for path {path}")]
    NoRoute { path: String },

    /// The inbound request could not be read.
    #[error("invalid request: {0}")]
    InvalidRequest(String),

    /// The backend could not be reached.
    #[error("service '{service}' unavailable: {reason}")]
    Unavailable { service: String, reason: String },

    /// The backend did not answer in time.
    #[error("service '{service}' timed out after {timeout:?}")]
    Timeout { service: String, timeout: Duration },

    /// Any other failure, including a malformed upstream body.
    #[error("{0}")]
    Internal(String),
}

impl ProxyError {
    /// Map error variant to appropriate HTTP status code
    pub fn status_code(&self) -> StatusCode {
        match self {
            ProxyError::NoRoute { .. } => StatusCode::NOT_FOUND,
            ProxyError::InvalidRequest(_) => StatusCode::BAD_REQUEST,
            ProxyError::Unavailable { .. } => StatusCode::SERVICE_UNAVAILABLE,
            ProxyError::Timeout { .. } => StatusCode::GATEWAY_TIMEOUT,
            ProxyError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Short machine-readable name, used in logs.
    pub fn error_type(&self) -> &'static str {
        match self {
            ProxyError::NoRoute { .. } => "no_route",
            ProxyError::InvalidRequest(_) => "invalid_request",
            ProxyError::Unavailable { .. } => "service_unavailable",
            ProxyError::Timeout { .. } => "timeout",
            ProxyError::Internal(_) => "internal_error",
        }
    }

    /// Message shown to the caller.
    pub fn detail(&self) -> String {
        match self {
            ProxyError::NoRoute { .. } => "Not Found".to_string(),
            ProxyError::InvalidRequest(reason) => format!("Invalid request: {}", reason),
            ProxyError::Unavailable { .. } => {
                "Service unavailable. Check that the backend service is running.".to_string()
            }
            ProxyError::Timeout { .. } => {
                "Timed out waiting for the backend service.".to_string()
            }
            ProxyError::Internal(reason) => format!("Error processing request: {}", reason),
        }
    }
}

impl IntoResponse for ProxyError {
    fn into_response(self) -> Response {
        let body = serde_json::json!({ "detail": self.detail() });
        (self.status_code(), Json(body)).into_response()
    }
}

/// Render an error with its full `source()` chain.
pub fn error_chain(err: &(dyn std::error::Error + 'static)) -> String {
    let mut message = err.to_string();
    let mut current = err.source();
    while let Some(cause) = current {
        let text = cause.to_string();
        if !message.contains(&text) {
            message.push_str(": ");
            message.push_str(&text);
        }
        current = cause.source();
    }
    message
}

/// True when any error in the chain is an I/O timeout.
pub fn is_timeout(err: &(dyn std::error::Error + 'static)) -> bool {
    let mut current = Some(err);
    while let Some(cause) = current {
        if let Some(io) = cause.downcast_ref::<std::io::Error>() {
            if io.kind() == std::io::ErrorKind::TimedOut {
                return true;
            }
        }
        current = cause.source();
    }
    false
}
