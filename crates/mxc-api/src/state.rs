//! Application state shared by all handlers.

use mxc_core::Config;
use mxc_storage::MediaStore;
use std::sync::Arc;

/// Read-only configuration and the storage collaborator.
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    pub storage: Arc<dyn MediaStore>,
}

impl AppState {
    pub fn new(config: Config, storage: Arc<dyn MediaStore>) -> Self {
        Self { config, storage }
    }
}
