use crate::keys::{generate_media_id, media_key, metadata_key};
use crate::traits::{ByteStream, MediaStore, StorageError, StorageResult, StoredMedia};
use async_trait::async_trait;
use futures::StreamExt;
use mxc_core::{MediaId, ServerName, UploadMetadata};
use std::path::{Path, PathBuf};
use tokio::fs;
use tokio::io::AsyncWriteExt;

/// Local filesystem storage implementation
#[derive(Clone, Debug)]
pub struct LocalStorage {
    base_path: PathBuf,
}

impl LocalStorage {
    /// Create a new LocalStorage rooted at `base_path`, creating the directory if needed.
    pub async fn new(base_path: impl Into<PathBuf>) -> StorageResult<Self> {
        let base_path = base_path.into();

        fs::create_dir_all(&base_path).await.map_err(|e| {
            StorageError::ConfigError(format!(
                "Failed to create storage directory {}: {}",
                base_path.display(),
                e
            ))
        })?;

        Ok(LocalStorage { base_path })
    }

    pub fn base_path(&self) -> &Path {
        &self.base_path
    }

    fn key_to_path(&self, key: &str) -> PathBuf {
        self.base_path.join(key)
    }

    async fn ensure_parent_dir(&self, path: &Path) -> StorageResult<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).await?;
        }
        Ok(())
    }

    /// Stream `body` into `path`, failing if it is not exactly `expected` bytes.
    async fn write_body(&self, path: &Path, mut body: ByteStream, expected: u64) -> StorageResult<()> {
        let mut file = fs::File::create(path).await.map_err(|e| {
            StorageError::UploadFailed(format!("Failed to create file {}: {}", path.display(), e))
        })?;

        let mut received: u64 = 0;
        while let Some(chunk) = body.next().await {
            let chunk = chunk.map_err(|e| {
                StorageError::UploadFailed(format!("Failed to read request body: {}", e))
            })?;
            received += chunk.len() as u64;
            if received > expected {
                return Err(StorageError::SizeMismatch { expected, received });
            }
            file.write_all(&chunk).await.map_err(|e| {
                StorageError::UploadFailed(format!("Failed to write file {}: {}", path.display(), e))
            })?;
        }

        if received != expected {
            return Err(StorageError::SizeMismatch { expected, received });
        }

        file.sync_all().await.map_err(|e| {
            StorageError::UploadFailed(format!("Failed to sync file {}: {}", path.display(), e))
        })?;
        Ok(())
    }

    /// Remove a leftover file, ignoring one that was never created.
    async fn discard(&self, path: &Path) {
        match fs::remove_file(path).await {
            Ok(()) => {}
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
            Err(e) => {
                tracing::warn!(error = %e, path = %path.display(), "Failed to remove partial upload");
            }
        }
    }

    /// Body, then metadata sidecar, then rename into place.
    async fn write_media(
        &self,
        metadata: &UploadMetadata,
        media_id: &MediaId,
        body: ByteStream,
        part_path: &Path,
        record_path: &Path,
        path: &Path,
    ) -> StorageResult<u64> {
        let expected = u64::try_from(metadata.file_size_bytes.get()).map_err(|_| {
            StorageError::UploadFailed("declared size must be positive".to_string())
        })?;

        self.write_body(part_path, body, expected).await?;

        let record = StoredMedia::from_metadata(metadata, media_id.clone());
        let record_json = serde_json::to_vec_pretty(&record).map_err(|e| {
            StorageError::UploadFailed(format!("Failed to encode media metadata: {}", e))
        })?;
        fs::write(record_path, record_json).await?;
        fs::rename(part_path, path).await?;
        Ok(expected)
    }

    /// Store under a caller chosen id. On any failure nothing is left under the id.
    async fn store_as(
        &self,
        metadata: &UploadMetadata,
        media_id: MediaId,
        body: ByteStream,
    ) -> StorageResult<()> {
        let key = media_key(&metadata.origin, &media_id)?;
        let path = self.key_to_path(&key);
        let part_path = path.with_extension("part");
        let record_path = self.key_to_path(&metadata_key(&metadata.origin, &media_id)?);

        self.ensure_parent_dir(&path).await?;

        let start = std::time::Instant::now();

        let size_bytes = match self
            .write_media(metadata, &media_id, body, &part_path, &record_path, &path)
            .await
        {
            Ok(size_bytes) => size_bytes,
            Err(err) => {
                self.discard(&part_path).await;
                self.discard(&record_path).await;
                return Err(err);
            }
        };

        tracing::info!(
            path = %path.display(),
            key = %key,
            size_bytes,
            duration_ms = start.elapsed().as_secs_f64() * 1000.0,
            "Local storage upload successful"
        );

        Ok(())
    }
}

#[async_trait]
impl MediaStore for LocalStorage {
    async fn store(&self, metadata: &UploadMetadata, body: ByteStream) -> StorageResult<MediaId> {
        let media_id = generate_media_id();
        self.store_as(metadata, media_id.clone(), body).await?;
        Ok(media_id)
    }

    async fn exists(&self, origin: &ServerName, media_id: &MediaId) -> StorageResult<bool> {
        let path = self.key_to_path(&media_key(origin, media_id)?);
        Ok(fs::try_exists(&path).await?)
    }

    async fn metadata(&self, origin: &ServerName, media_id: &MediaId) -> StorageResult<StoredMedia> {
        let path = self.key_to_path(&metadata_key(origin, media_id)?);
        let data = match fs::read(&path).await {
            Ok(data) => data,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Err(StorageError::NotFound(format!("{}/{}", origin, media_id)));
            }
            Err(e) => return Err(e.into()),
        };
        serde_json::from_slice(&data).map_err(|e| {
            StorageError::UploadFailed(format!("Corrupt metadata record {}: {}", path.display(), e))
        })
    }
}
