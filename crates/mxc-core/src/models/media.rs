use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::borrow::Cow;
use std::fmt;

use crate::disposition::inline_disposition;
use crate::models::ContentUri;
use crate::validation::{validate_upload, UploadError};

macro_rules! string_newtype {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            pub fn new(value: impl Into<String>) -> Self {
                Self(value.into())
            }

            pub fn as_str(&self) -> &str {
                &self.0
            }

            pub fn is_empty(&self) -> bool {
                self.0.is_empty()
            }

            pub fn into_inner(self) -> String {
                self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl From<String> for $name {
            fn from(value: String) -> Self {
                Self(value)
            }
        }

        impl From<&str> for $name {
            fn from(value: &str) -> Self {
                Self(value.to_string())
            }
        }
    };
}

string_newtype!(
    /// Server identity that owns a piece of media (the `<origin>` in `mxc://<origin>/<id>`).
    ServerName
);
string_newtype!(
    /// Raw or derived `Content-Disposition` value.
    ContentDisposition
);
string_newtype!(
    /// MIME type as sent by the client. Not checked against an allowlist.
    ContentType
);
string_newtype!(
    /// Identifier assigned to stored media by the storage backend.
    MediaId
);

/// Client supplied upload filename.
///
/// Kept as the percent-decoded bytes of the query value, which need not be
/// UTF-8; the derived disposition escapes those exact bytes.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct Filename(Vec<u8>);

impl Filename {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into().into_bytes())
    }

    pub fn from_bytes(bytes: impl Into<Vec<u8>>) -> Self {
        Self(bytes.into())
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    pub fn to_string_lossy(&self) -> Cow<'_, str> {
        String::from_utf8_lossy(&self.0)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for Filename {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_string_lossy())
    }
}

impl From<String> for Filename {
    fn from(value: String) -> Self {
        Self(value.into_bytes())
    }
}

impl From<&str> for Filename {
    fn from(value: &str) -> Self {
        Self(value.as_bytes().to_vec())
    }
}

// Records store the name as text; invalid UTF-8 is replaced there.
impl Serialize for Filename {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_string_lossy())
    }
}

impl<'de> Deserialize<'de> for Filename {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        String::deserialize(deserializer).map(Filename::from)
    }
}

/// Declared payload length in bytes.
///
/// Signed so that an unknown length can be carried as `-1`; only values
/// greater than zero pass validation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FileSizeBytes(pub i64);

impl FileSizeBytes {
    pub const UNKNOWN: FileSizeBytes = FileSizeBytes(-1);

    pub fn get(self) -> i64 {
        self.0
    }
}

impl fmt::Display for FileSizeBytes {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Metadata describing an in-flight upload.
///
/// Every field comes from request transport fields or configuration, never
/// from the payload itself. `media_id` stays `None` until the storage
/// backend has accepted the bytes.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UploadMetadata {
    pub origin: ServerName,
    pub content_disposition: ContentDisposition,
    pub file_size_bytes: FileSizeBytes,
    pub content_type: ContentType,
    pub upload_name: Filename,
    pub user_id: String,
    pub media_id: Option<MediaId>,
}

impl UploadMetadata {
    /// Run the intake checks against `max_file_size_bytes` (0 disables the ceiling).
    pub fn validate(&self, max_file_size_bytes: FileSizeBytes) -> Result<(), UploadError> {
        validate_upload(self, max_file_size_bytes)
    }

    /// Record the id storage assigned and return the content URI it forms.
    pub fn assign_media_id(&mut self, media_id: MediaId) -> ContentUri {
        self.media_id = Some(media_id.clone());
        ContentUri::new(self.origin.clone(), media_id)
    }

    /// Replace the disposition with an inline one derived from the upload name.
    ///
    /// A derived value always wins over a client supplied header. Nothing
    /// changes when no upload name was given.
    pub fn normalize_content_disposition(&mut self) {
        if !self.upload_name.is_empty() {
            self.content_disposition = inline_disposition(&self.upload_name);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalize_overrides_client_disposition() {
        let mut metadata = UploadMetadata {
            content_disposition: ContentDisposition::new("attachment; filename=evil.exe"),
            upload_name: Filename::new("report.pdf"),
            ..Default::default()
        };
        metadata.normalize_content_disposition();
        assert_eq!(
            metadata.content_disposition.as_str(),
            "inline; filename*=utf-8''report.pdf"
        );
    }

    #[test]
    fn normalize_without_name_keeps_header_value() {
        let mut metadata = UploadMetadata {
            content_disposition: ContentDisposition::new("attachment"),
            ..Default::default()
        };
        metadata.normalize_content_disposition();
        assert_eq!(metadata.content_disposition.as_str(), "attachment");

        let mut empty = UploadMetadata::default();
        empty.normalize_content_disposition();
        assert!(empty.content_disposition.is_empty());
    }

    #[test]
    fn assign_media_id_builds_content_uri() {
        let mut metadata = UploadMetadata {
            origin: ServerName::new("example.com"),
            ..Default::default()
        };
        let uri = metadata.assign_media_id(MediaId::new("abc123"));
        assert_eq!(uri.to_string(), "mxc://example.com/abc123");
        assert_eq!(metadata.media_id, Some(MediaId::new("abc123")));
    }

    #[test]
    fn filename_keeps_raw_bytes() {
        let name = Filename::from_bytes(vec![0xFF, b'.', b'p', b'n', b'g']);
        assert_eq!(name.as_bytes(), b"\xFF.png");
        assert_eq!(name.to_string_lossy(), "\u{FFFD}.png");

        let json = serde_json::to_string(&Filename::new("a.png")).unwrap();
        assert_eq!(json, "\"a.png\"");
        let back: Filename = serde_json::from_str(&json).unwrap();
        assert_eq!(back, Filename::new("a.png"));
    }

    #[test]
    fn file_size_serializes_as_plain_integer() {
        let json = serde_json::to_string(&FileSizeBytes(1024)).unwrap();
        assert_eq!(json, "1024");
    }
}
