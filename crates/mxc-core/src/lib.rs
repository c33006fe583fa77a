//! mxc core library
//!
//! Upload metadata models, the intake validator, Content-Disposition
//! derivation, shared error types and configuration.

pub mod config;
pub mod disposition;
pub mod error;
pub mod models;
pub mod validation;

// Re-export commonly used types
pub use config::{BaseConfig, Config, MediaApiConfig};
pub use error::{AppError, ErrorKind, ErrorMetadata, LogLevel};
pub use models::{
    ContentDisposition, ContentType, ContentUri, FileSizeBytes, Filename, MediaId, ServerName,
    UploadMetadata,
};
pub use validation::{UploadError, UserId};
