//! Storage abstraction trait
//!
//! The upload endpoint only talks to storage through [`MediaStore`], after
//! the request has passed intake validation.

use async_trait::async_trait;
use bytes::Bytes;
use futures::Stream;
use mxc_core::{
    ContentDisposition, ContentType, FileSizeBytes, Filename, MediaId, ServerName, UploadMetadata,
};
use serde::{Deserialize, Serialize};
use std::pin::Pin;
use thiserror::Error;

/// Request body as handed to storage.
pub type ByteStream = Pin<Box<dyn Stream<Item = std::io::Result<Bytes>> + Send>>;

/// Storage operation errors
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Upload failed: {0}")]
    UploadFailed(String),

    #[error("Media not found: {0}")]
    NotFound(String),

    #[error("Invalid storage key: {0}")]
    InvalidKey(String),

    #[error("Body length does not match Content-Length: expected {expected} bytes, received {received}")]
    SizeMismatch { expected: u64, received: u64 },

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    ConfigError(String),
}

/// Result type for storage operations
pub type StorageResult<T> = Result<T, StorageError>;

/// Metadata persisted alongside stored media.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoredMedia {
    pub origin: ServerName,
    pub media_id: MediaId,
    pub content_type: ContentType,
    pub content_disposition: ContentDisposition,
    pub file_size_bytes: FileSizeBytes,
    #[serde(default, skip_serializing_if = "Filename::is_empty")]
    pub upload_name: Filename,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub user_id: String,
}

impl StoredMedia {
    pub fn from_metadata(metadata: &UploadMetadata, media_id: MediaId) -> Self {
        StoredMedia {
            origin: metadata.origin.clone(),
            media_id,
            content_type: metadata.content_type.clone(),
            content_disposition: metadata.content_disposition.clone(),
            file_size_bytes: metadata.file_size_bytes,
            upload_name: metadata.upload_name.clone(),
            user_id: metadata.user_id.clone(),
        }
    }
}

/// Storage collaborator for validated uploads.
///
/// Implementations read `body` to the end, persist it, and assign the
/// [`MediaId`] the content URI is built from.
#[async_trait]
pub trait MediaStore: Send + Sync {
    /// Persist an upload whose metadata has already been validated.
    ///
    /// The body must be exactly `metadata.file_size_bytes` long; anything
    /// else fails with [`StorageError::SizeMismatch`] and nothing is kept.
    async fn store(&self, metadata: &UploadMetadata, body: ByteStream) -> StorageResult<MediaId>;

    /// Check if media exists
    async fn exists(&self, origin: &ServerName, media_id: &MediaId) -> StorageResult<bool>;

    /// Load the metadata recorded for stored media
    async fn metadata(&self, origin: &ServerName, media_id: &MediaId)
        -> StorageResult<StoredMedia>;
}
