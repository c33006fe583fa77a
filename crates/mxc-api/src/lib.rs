//! mxc API Library
//!
//! HTTP surface of the media upload service: the upload handler, error
//! rendering, application setup and telemetry.

mod api_doc;
pub mod constants;
pub mod error;
pub mod handlers;
pub mod services;
pub mod setup;
pub mod state;
pub mod telemetry;

// Re-exports
pub use error::{ErrorResponse, HttpAppError};
pub use services::upload::{AuthenticatedUser, UploadResponse};
pub use state::AppState;
