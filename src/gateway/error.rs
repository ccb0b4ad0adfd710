use axum::{
    Json,
    http::{HeaderMap, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
};
use thiserror::Error;
use tracing::error;

use crate::cache::CacheStatus;
use crate::constants::WARDEN_CACHE_HEADER;
use crate::pipeline::PipelineError;

/// Detail returned for internal errors in production.
pub const GENERIC_ERROR_DETAIL: &str = "An error occurred processing your request";

#[derive(Debug, Error)]
pub enum GatewayError {
    /// Request body missing, malformed, or outside the accepted bounds.
    #[error("invalid request: {0}")]
    Validation(String),

    /// The pipeline deliberately declined to answer.
    #[error("refused: {reason}")]
    Refused { reason: String, cache: CacheStatus },

    /// The pipeline failed. `detail` is already redacted when running in production.
    #[error("internal error: {detail}")]
    Internal { detail: String },
}

impl GatewayError {
    /// Maps a pipeline failure, hiding its cause when `redact` is set.
    pub fn from_pipeline(err: PipelineError, redact: bool) -> Self {
        error!(error = %err, "Pipeline failure");
        let detail = if redact {
            GENERIC_ERROR_DETAIL.to_string()
        } else {
            err.to_string()
        };
        GatewayError::Internal { detail }
    }
}

#[derive(Debug, serde::Serialize, serde::Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    pub detail: String,
}

impl IntoResponse for GatewayError {
    fn into_response(self) -> Response {
        let mut headers = HeaderMap::new();

        let (status, error, detail) = match self {
            GatewayError::Validation(detail) => {
                (StatusCode::UNPROCESSABLE_ENTITY, "validation_error", detail)
            }
            GatewayError::Refused { reason, cache } => {
                headers.insert(
                    WARDEN_CACHE_HEADER,
                    HeaderValue::from_static(cache.as_header_value()),
                );
                (StatusCode::BAD_REQUEST, "refused", reason)
            }
            GatewayError::Internal { detail } => {
                (StatusCode::INTERNAL_SERVER_ERROR, "internal_error", detail)
            }
        };

        let body = Json(ErrorResponse {
            error: error.to_string(),
            detail,
        });

        (status, headers, body).into_response()
    }
}
