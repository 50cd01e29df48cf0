use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use zonecheck_common::types::DomainError;
use zonecheck_engine::EngineError;
use zonecheck_storage::StorageError;

use crate::api::error_response;

/// Root cause of a failed create-check run.
#[derive(Debug, thiserror::Error)]
pub enum CheckFailure {
    #[error(transparent)]
    Engine(#[from] EngineError),

    #[error(transparent)]
    Storage(#[from] StorageError),

    /// The background task running the check panicked or was cancelled.
    #[error("check task aborted: {0}")]
    Task(String),
}

/// Errors surfaced by the check service and the HTTP handlers.
#[derive(Debug, thiserror::Error)]
pub enum ServiceError {
    /// The requested domain is malformed.
    #[error("{0}")]
    ValidationFailed(#[from] DomainError),

    /// Request body, path or query could not be decoded.
    #[error("{0}")]
    InvalidRequest(String),

    #[error("DNS check not found")]
    NotFound,

    /// The orchestrated check did not complete; nothing partial is returned.
    #[error("DNS check failed: {0}")]
    CheckFailed(#[from] CheckFailure),

    /// Storage failure on a read path.
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),
}

impl ServiceError {
    pub fn status(&self) -> StatusCode {
        match self {
            Self::ValidationFailed(_) | Self::InvalidRequest(_) => StatusCode::UNPROCESSABLE_ENTITY,
            Self::NotFound => StatusCode::NOT_FOUND,
            Self::CheckFailed(_) => StatusCode::SERVICE_UNAVAILABLE,
            Self::Storage(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ServiceError {
    fn into_response(self) -> Response {
        let status = self.status();
        match &self {
            Self::Storage(e) => {
                tracing::error!(error = %e, "Storage query failed");
                error_response(status, "Internal storage error")
            }
            Self::CheckFailed(e) => {
                tracing::warn!(error = %e, "DNS check failed");
                error_response(status, &self.to_string())
            }
            _ => error_response(status, &self.to_string()),
        }
    }
}
