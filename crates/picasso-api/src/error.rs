use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use thiserror::Error;
use tracing::error;

/// Error taxonomy shared by every handler. Each variant carries the literal
/// message the client sees in the `{"error": ...}` body.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Request body failed structural validation.
    #[error("{0}")]
    Validation(String),

    /// A lookup matched zero rows.
    #[error("{0}")]
    NotFound(String),

    /// Signup with an email that already has an account.
    #[error("{0}")]
    Conflict(String),

    /// Anything unexpected from the storage layer.
    #[error(transparent)]
    Storage(#[from] anyhow::Error),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match &self {
            ApiError::Validation(_) | ApiError::Conflict(_) => StatusCode::UNPROCESSABLE_ENTITY,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Storage(e) => {
                error!("storage error: {e:#}");
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };

        (status, Json(json!({ "error": self.to_string() }))).into_response()
    }
}
