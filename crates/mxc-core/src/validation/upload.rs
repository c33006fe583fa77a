//! Upload intake checks.
//!
//! All checks look at request metadata only, so an abusive upload is turned
//! away before a single body byte is read.

use thiserror::Error;

use super::user_id::UserId;
use crate::error::ErrorKind;
use crate::models::{FileSizeBytes, UploadMetadata};

/// Reasons an upload request is rejected at intake. All are client errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum UploadError {
    #[error("HTTP request method must be POST.")]
    MethodNotPost,

    #[error("HTTP Content-Length request header must be a valid integer.")]
    InvalidContentLength,

    #[error("HTTP Content-Length request header must be greater than zero.")]
    NonPositiveSize,

    #[error("HTTP Content-Length is greater than the maximum allowed upload size ({max}).")]
    TooLarge { max: FileSizeBytes },

    #[error("HTTP Content-Type request header must be set.")]
    MissingContentType,

    #[error("user id must start with '@'")]
    UserIdMissingSigil,

    #[error("user id must be in the form @localpart:domain")]
    UserIdMalformed,
}

impl UploadError {
    /// Matrix error kind reported to the client.
    pub fn kind(&self) -> ErrorKind {
        match self {
            UploadError::UserIdMalformed => ErrorKind::BadJson,
            _ => ErrorKind::Unknown,
        }
    }

    /// Stable identifier for logs and metrics.
    pub fn code(&self) -> &'static str {
        match self {
            UploadError::MethodNotPost => "METHOD_NOT_POST",
            UploadError::InvalidContentLength => "INVALID_CONTENT_LENGTH",
            UploadError::NonPositiveSize => "NON_POSITIVE_SIZE",
            UploadError::TooLarge { .. } => "UPLOAD_TOO_LARGE",
            UploadError::MissingContentType => "MISSING_CONTENT_TYPE",
            UploadError::UserIdMissingSigil => "USER_ID_MISSING_SIGIL",
            UploadError::UserIdMalformed => "USER_ID_MALFORMED",
        }
    }
}

/// Apply the intake checks in order, stopping at the first failure.
///
/// A `max_file_size_bytes` of zero (or less) means no ceiling.
pub fn validate_upload(
    metadata: &UploadMetadata,
    max_file_size_bytes: FileSizeBytes,
) -> Result<(), UploadError> {
    if metadata.file_size_bytes.get() < 1 {
        return Err(UploadError::NonPositiveSize);
    }
    if max_file_size_bytes.get() > 0 && metadata.file_size_bytes > max_file_size_bytes {
        return Err(UploadError::TooLarge {
            max: max_file_size_bytes,
        });
    }
    // TODO: check the content type against a configurable allowlist
    if metadata.content_type.is_empty() {
        return Err(UploadError::MissingContentType);
    }
    if !metadata.user_id.is_empty() {
        UserId::parse(&metadata.user_id)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ContentType;

    fn valid_metadata() -> UploadMetadata {
        UploadMetadata {
            file_size_bytes: FileSizeBytes(1024),
            content_type: ContentType::new("image/png"),
            ..Default::default()
        }
    }

    #[test]
    fn accepts_minimal_valid_upload() {
        assert_eq!(validate_upload(&valid_metadata(), FileSizeBytes(2048)), Ok(()));
    }

    #[test]
    fn rejects_non_positive_sizes() {
        for size in [0, -1, i64::MIN] {
            let metadata = UploadMetadata {
                file_size_bytes: FileSizeBytes(size),
                ..valid_metadata()
            };
            let err = validate_upload(&metadata, FileSizeBytes(0)).unwrap_err();
            assert_eq!(err, UploadError::NonPositiveSize);
            assert!(err.to_string().contains("must be greater than zero"));
        }
    }

    #[test]
    fn zero_max_means_unlimited() {
        let metadata = UploadMetadata {
            file_size_bytes: FileSizeBytes(i64::MAX),
            ..valid_metadata()
        };
        assert_eq!(validate_upload(&metadata, FileSizeBytes(0)), Ok(()));
    }

    #[test]
    fn size_equal_to_max_is_allowed() {
        let metadata = UploadMetadata {
            file_size_bytes: FileSizeBytes(2048),
            ..valid_metadata()
        };
        assert_eq!(validate_upload(&metadata, FileSizeBytes(2048)), Ok(()));
    }

    #[test]
    fn too_large_message_names_the_limit() {
        let metadata = UploadMetadata {
            file_size_bytes: FileSizeBytes(2049),
            ..valid_metadata()
        };
        let err = validate_upload(&metadata, FileSizeBytes(2048)).unwrap_err();
        assert_eq!(
            err,
            UploadError::TooLarge {
                max: FileSizeBytes(2048)
            }
        );
        assert_eq!(
            err.to_string(),
            "HTTP Content-Length is greater than the maximum allowed upload size (2048)."
        );
    }

    #[test]
    fn rejects_empty_content_type() {
        let metadata = UploadMetadata {
            content_type: ContentType::default(),
            user_id: "@bob:example.com".to_string(),
            ..valid_metadata()
        };
        assert_eq!(
            validate_upload(&metadata, FileSizeBytes(0)),
            Err(UploadError::MissingContentType)
        );
    }

    #[test]
    fn size_is_checked_before_content_type() {
        let metadata = UploadMetadata {
            file_size_bytes: FileSizeBytes(0),
            content_type: ContentType::default(),
            user_id: "bob".to_string(),
            ..Default::default()
        };
        assert_eq!(
            validate_upload(&metadata, FileSizeBytes(0)),
            Err(UploadError::NonPositiveSize)
        );
    }

    #[test]
    fn user_id_checks() {
        let cases = [
            ("", Ok(())),
            ("@bob:example.com", Ok(())),
            ("bob", Err(UploadError::UserIdMissingSigil)),
            ("@bob", Err(UploadError::UserIdMalformed)),
        ];
        for (user_id, expected) in cases {
            let metadata = UploadMetadata {
                user_id: user_id.to_string(),
                ..valid_metadata()
            };
            assert_eq!(validate_upload(&metadata, FileSizeBytes(0)), expected, "{user_id}");
        }
    }

    #[test]
    fn user_id_errors_have_distinct_kinds() {
        assert_eq!(UploadError::UserIdMissingSigil.kind(), ErrorKind::Unknown);
        assert_eq!(UploadError::UserIdMalformed.kind(), ErrorKind::BadJson);
        assert_ne!(
            UploadError::UserIdMissingSigil.code(),
            UploadError::UserIdMalformed.code()
        );
    }
}
