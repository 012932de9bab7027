use std::net::SocketAddr;

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use csp_scout_core::config::ConfigError;
use csp_scout_core::error::CoreError;
use serde_json::json;

/// Application-level error type for HTTP handlers.
///
/// Wraps [`CoreError`] for domain errors and adds HTTP-specific variants.
/// Implements [`IntoResponse`] to produce `{"error": "<message>"}` bodies;
/// this is the only place error kinds become status codes.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// A domain-level error from the service or repository.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// The request itself could not be parsed (body or query string).
    #[error("Bad request: {0}")]
    BadRequest(String),
}

/// Convenience type alias for handler return values.
pub type AppResult<T> = Result<T, AppError>;

/// Body message for a request aborted while the store was working.
pub const CANCELED_MESSAGE: &str = "request canceled";

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            AppError::Core(core) => match core {
                CoreError::Validation(msg) => (StatusCode::BAD_REQUEST, msg),
                err @ CoreError::NotFound { .. } => (StatusCode::NOT_FOUND, err.to_string()),
                err @ CoreError::Store { .. } => (StatusCode::INTERNAL_SERVER_ERROR, err.to_string()),
                CoreError::Canceled { operation } => {
                    tracing::info!(operation, "Request canceled during store operation");
                    (StatusCode::SERVICE_UNAVAILABLE, CANCELED_MESSAGE.to_string())
                }
                CoreError::Internal(msg) => {
                    tracing::error!(error = %msg, "Internal error");
                    (
                        StatusCode::INTERNAL_SERVER_ERROR,
                        "An internal error occurred".to_string(),
                    )
                }
            },
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
        };

        (status, axum::Json(json!({ "error": message }))).into_response()
    }
}

/// Fatal failures while starting the server. The binary logs these and exits
/// with a non-zero status.
#[derive(Debug, thiserror::Error)]
pub enum BootError {
    #[error("invalid configuration: {0}")]
    Config(#[from] ConfigError),

    #[error("report store unavailable: {0}")]
    Store(#[from] CoreError),

    #[error("failed to bind {addr}: {source}")]
    Bind {
        addr: SocketAddr,
        #[source]
        source: std::io::Error,
    },

    #[error("server error: {0}")]
    Serve(#[source] std::io::Error),
}
