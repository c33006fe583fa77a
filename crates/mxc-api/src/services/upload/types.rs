use mxc_core::{ContentUri, UploadMetadata};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Upload metadata plus the log context of the request it came from.
///
/// The span is carried explicitly so every step of the upload logs under the
/// same request id.
#[derive(Debug)]
pub struct UploadRequest {
    pub metadata: UploadMetadata,
    pub span: tracing::Span,
}

/// Identity of the uploader, inserted into request extensions by whatever
/// authenticates the client in front of this service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthenticatedUser(pub String);

/// Successful upload body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct UploadResponse {
    /// `mxc://<origin>/<media-id>` of the stored media
    #[schema(example = "mxc://example.com/0f4c7d1b2a9e4c3f8d6b5a4e3c2b1a09")]
    pub content_uri: String,
}

impl From<ContentUri> for UploadResponse {
    fn from(uri: ContentUri) -> Self {
        UploadResponse {
            content_uri: uri.to_string(),
        }
    }
}
