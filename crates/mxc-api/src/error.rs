//! HTTP error response conversion
//!
//! Handlers return `Result<_, HttpAppError>`. Domain errors convert into it
//! with `From`, and it renders the Matrix error body
//! `{"errcode": "...", "error": "..."}` with the status from [`ErrorMetadata`].

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use mxc_core::{AppError, ErrorKind, ErrorMetadata, LogLevel, UploadError};
use mxc_storage::StorageError;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Matrix standard error body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct ErrorResponse {
    /// Machine-readable error kind, e.g. `M_UNKNOWN` or `M_BAD_JSON`
    #[schema(value_type = String, example = "M_UNKNOWN")]
    pub errcode: ErrorKind,
    /// Human-readable message
    pub error: String,
}

impl ErrorResponse {
    pub fn new(errcode: ErrorKind, error: impl Into<String>) -> Self {
        Self {
            errcode,
            error: error.into(),
        }
    }
}

/// Wrapper type for AppError to implement IntoResponse
/// (orphan rule: both the trait and AppError live in other crates).
#[derive(Debug)]
pub struct HttpAppError(pub AppError);

impl From<AppError> for HttpAppError {
    fn from(err: AppError) -> Self {
        HttpAppError(err)
    }
}

impl From<UploadError> for HttpAppError {
    fn from(err: UploadError) -> Self {
        HttpAppError(AppError::Upload(err))
    }
}

impl From<StorageError> for HttpAppError {
    fn from(err: StorageError) -> Self {
        let app = match err {
            StorageError::SizeMismatch { .. } => AppError::BadRequest(err.to_string()),
            StorageError::IoError(err) => AppError::InternalWithSource {
                message: "Storage I/O failed".to_string(),
                source: err.into(),
            },
            StorageError::ConfigError(msg) => AppError::Internal(msg),
            other => AppError::Storage(other.to_string()),
        };
        HttpAppError(app)
    }
}

fn log_error(error: &AppError) {
    let error_type = error.error_type();
    match error.log_level() {
        LogLevel::Debug => {
            tracing::debug!(error = %error, error_type = error_type, "Error occurred");
        }
        LogLevel::Error => {
            tracing::error!(error = %error.detailed_message(), error_type = error_type, "Error occurred");
        }
    }
}

impl IntoResponse for HttpAppError {
    fn into_response(self) -> Response {
        let app_error = &self.0;
        let status = StatusCode::from_u16(app_error.http_status_code())
            .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

        log_error(app_error);

        let body = ErrorResponse::new(app_error.error_kind(), app_error.client_message());
        (status, Json(body)).into_response()
    }
}
