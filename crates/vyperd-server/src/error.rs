//! Error types for the vyperd server.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

/// Server error type.
///
/// Anything surfacing here is outside the classified compile taxonomy;
/// classified failures travel as payloads, never as errors.
#[derive(Debug, thiserror::Error)]
pub enum ServerError {
    /// The compiler invoker failed for infrastructure reasons.
    #[error("compiler invocation failed: {0}")]
    Compiler(#[from] vyperd_core::Error),

    /// A worker task died before producing a result.
    #[error("worker failure: {0}")]
    Worker(String),

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// The configured listen address could not be parsed.
    #[error("invalid listen address: {0}")]
    Address(String),
}

/// Result type for server operations.
pub type ServerResult<T> = std::result::Result<T, ServerError>;

impl IntoResponse for ServerError {
    fn into_response(self) -> Response {
        tracing::error!("request failed: {}", self);
        (StatusCode::INTERNAL_SERVER_ERROR, self.to_string()).into_response()
    }
}
