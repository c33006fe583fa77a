//! Media upload: intake, validation and hand-off to storage.

pub mod extract;
pub mod service;
pub mod types;

pub use extract::{extract_upload_request, parse_and_validate_request};
pub use service::UploadService;
pub use types::{AuthenticatedUser, UploadRequest, UploadResponse};
