//! Validation modules

pub mod upload;
pub mod user_id;

pub use upload::{validate_upload, UploadError};
pub use user_id::UserId;
