//! Mapping of core failures onto HTTP responses.

use api_shared::ErrorRes;
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use textlens_core::{AnalysisError, ErrorKind};

/// Message returned for every internal fault; the cause is only logged.
pub const INTERNAL_ERROR_MESSAGE: &str = "An internal server error occurred";

/// Error returned by REST handlers.
#[derive(Debug)]
pub enum ApiError {
    /// 400: the request was malformed.
    BadRequest(String),
    /// 502: the analysis provider failed.
    BadGateway(String),
    /// 500: anything else.
    Internal,
}

impl From<AnalysisError> for ApiError {
    fn from(err: AnalysisError) -> Self {
        match err.kind() {
            ErrorKind::Validation => ApiError::BadRequest(err.to_string()),
            ErrorKind::Upstream => {
                tracing::warn!("upstream analysis failure: {}", err);
                ApiError::BadGateway(err.to_string())
            }
            ErrorKind::Internal => {
                tracing::error!("internal error: {:?}", err);
                ApiError::Internal
            }
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            ApiError::BadGateway(msg) => (StatusCode::BAD_GATEWAY, msg),
            ApiError::Internal => (
                StatusCode::INTERNAL_SERVER_ERROR,
                INTERNAL_ERROR_MESSAGE.to_string(),
            ),
        };

        (status, Json(ErrorRes::new(message))).into_response()
    }
}
