//! Domain models

pub mod content_uri;
pub mod media;

pub use content_uri::ContentUri;
pub use media::{
    ContentDisposition, ContentType, FileSizeBytes, Filename, MediaId, ServerName, UploadMetadata,
};
