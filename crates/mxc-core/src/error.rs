//! Error types module
//!
//! `AppError` unifies intake, storage and internal failures. Each variant
//! describes its own HTTP presentation through [`ErrorMetadata`], so the
//! HTTP layer only has to render the result.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::validation::UploadError;

/// Matrix `errcode` values used by the media API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ErrorKind {
    #[serde(rename = "M_UNKNOWN")]
    Unknown,
    #[serde(rename = "M_BAD_JSON")]
    BadJson,
}

impl ErrorKind {
    pub fn errcode(self) -> &'static str {
        match self {
            ErrorKind::Unknown => "M_UNKNOWN",
            ErrorKind::BadJson => "M_BAD_JSON",
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.errcode())
    }
}

/// Log level for error reporting
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogLevel {
    /// Expected client mistakes such as validation failures
    Debug,
    /// Unexpected failures
    Error,
}

/// Metadata for error responses - defines how an error should be presented
pub trait ErrorMetadata {
    /// HTTP status code to return
    fn http_status_code(&self) -> u16;

    /// Matrix error kind for the response body
    fn error_kind(&self) -> ErrorKind;

    /// Client-facing message (may differ from internal error message)
    fn client_message(&self) -> String;

    /// Whether details must stay out of the response
    fn is_sensitive(&self) -> bool;

    /// Log level for this error
    fn log_level(&self) -> LogLevel;
}

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Upload rejected: {0}")]
    Upload(#[from] UploadError),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Storage error: {0}")]
    Storage(String),

    #[error("Internal error: {0}")]
    Internal(String),

    #[error("Internal error: {message}")]
    InternalWithSource {
        message: String,
        #[source]
        source: anyhow::Error,
    },
}

/// (http_status, sensitive, log_level) per variant.
fn app_error_static_metadata(err: &AppError) -> (u16, bool, LogLevel) {
    match err {
        AppError::Upload(_) => (400, false, LogLevel::Debug),
        AppError::BadRequest(_) => (400, false, LogLevel::Debug),
        AppError::Storage(_) => (500, true, LogLevel::Error),
        AppError::Internal(_) => (500, true, LogLevel::Error),
        AppError::InternalWithSource { .. } => (500, true, LogLevel::Error),
    }
}

impl AppError {
    /// Get the error type name for log fields
    pub fn error_type(&self) -> &str {
        match self {
            AppError::Upload(err) => err.code(),
            AppError::BadRequest(_) => "BadRequest",
            AppError::Storage(_) => "Storage",
            AppError::Internal(_) => "Internal",
            AppError::InternalWithSource { .. } => "Internal",
        }
    }

    /// Error message including the source chain
    pub fn detailed_message(&self) -> String {
        use std::error::Error;

        let mut details = self.to_string();
        let mut source = self.source();
        let mut depth = 0;
        while let Some(err) = source {
            depth += 1;
            if depth > 5 {
                details.push_str("\n  ... (truncated)");
                break;
            }
            details.push_str(&format!("\n  Caused by: {}", err));
            source = err.source();
        }
        details
    }
}

impl ErrorMetadata for AppError {
    fn http_status_code(&self) -> u16 {
        app_error_static_metadata(self).0
    }

    fn error_kind(&self) -> ErrorKind {
        match self {
            AppError::Upload(err) => err.kind(),
            _ => ErrorKind::Unknown,
        }
    }

    fn client_message(&self) -> String {
        match self {
            AppError::Upload(err) => err.to_string(),
            AppError::BadRequest(ref msg) => msg.clone(),
            AppError::Storage(_) => "Failed to store media".to_string(),
            AppError::Internal(_) | AppError::InternalWithSource { .. } => {
                "Internal server error".to_string()
            }
        }
    }

    fn is_sensitive(&self) -> bool {
        app_error_static_metadata(self).1
    }

    fn log_level(&self) -> LogLevel {
        app_error_static_metadata(self).2
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::FileSizeBytes;

    #[test]
    fn test_error_metadata_upload_rejection() {
        let err = AppError::from(UploadError::TooLarge {
            max: FileSizeBytes(2048),
        });
        assert_eq!(err.http_status_code(), 400);
        assert_eq!(err.error_kind(), ErrorKind::Unknown);
        assert!(err.client_message().contains("2048"));
        assert!(!err.is_sensitive());
        assert_eq!(err.log_level(), LogLevel::Debug);
        assert_eq!(err.error_type(), "UPLOAD_TOO_LARGE");
    }

    #[test]
    fn test_error_metadata_malformed_user_id() {
        let err = AppError::from(UploadError::UserIdMalformed);
        assert_eq!(err.http_status_code(), 400);
        assert_eq!(err.error_kind(), ErrorKind::BadJson);
        assert_eq!(
            err.client_message(),
            "user id must be in the form @localpart:domain"
        );
    }

    #[test]
    fn test_error_metadata_storage_hides_details() {
        let err = AppError::Storage("disk full at /var/lib/media".to_string());
        assert_eq!(err.http_status_code(), 500);
        assert_eq!(err.client_message(), "Failed to store media");
        assert!(err.is_sensitive());
        assert_eq!(err.log_level(), LogLevel::Error);
    }

    #[test]
    fn test_detailed_message_includes_source() {
        let err = AppError::InternalWithSource {
            message: "Failed to write media".to_string(),
            source: anyhow::anyhow!("disk full").context("write /srv/media/abc"),
        };
        let details = err.detailed_message();
        assert!(details.starts_with("Internal error: Failed to write media"));
        assert!(details.contains("Caused by: write /srv/media/abc"));
        assert_eq!(err.client_message(), "Internal server error");
    }

    #[test]
    fn test_error_kind_serializes_as_errcode() {
        assert_eq!(
            serde_json::to_string(&ErrorKind::BadJson).unwrap(),
            "\"M_BAD_JSON\""
        );
        assert_eq!(ErrorKind::Unknown.to_string(), "M_UNKNOWN");
    }
}
