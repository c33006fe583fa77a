use axum::body::Body;
use futures::TryStreamExt;
use mxc_storage::{ByteStream, MediaStore, StorageError};
use std::sync::Arc;
use tracing::Instrument;

use super::types::{UploadRequest, UploadResponse};
use crate::error::HttpAppError;

/// Hands validated uploads to storage and formats the content URI.
pub struct UploadService {
    storage: Arc<dyn MediaStore>,
}

impl UploadService {
    pub fn new(storage: Arc<dyn MediaStore>) -> Self {
        Self { storage }
    }

    /// Store the body of an accepted upload request.
    ///
    /// `request` must come from `parse_and_validate_request`; the body is
    /// only read here.
    pub async fn upload(
        &self,
        request: UploadRequest,
        body: Body,
    ) -> Result<UploadResponse, HttpAppError> {
        let UploadRequest { mut metadata, span } = request;
        let stream: ByteStream = Box::pin(body.into_data_stream().map_err(std::io::Error::other));

        async move {
            let media_id = self.storage.store(&metadata, stream).await.map_err(|err| {
                if let StorageError::SizeMismatch { .. } = err {
                    tracing::debug!(error = %err, "Upload body did not match declared length");
                } else {
                    tracing::error!(error = %err, "Failed to store upload");
                }
                HttpAppError::from(err)
            })?;
            let uri = metadata.assign_media_id(media_id);
            tracing::info!(
                content_uri = %uri,
                file_size_bytes = %metadata.file_size_bytes,
                content_type = %metadata.content_type,
                "Upload stored"
            );
            Ok::<_, HttpAppError>(UploadResponse::from(uri))
        }
        .instrument(span)
        .await
    }
}
