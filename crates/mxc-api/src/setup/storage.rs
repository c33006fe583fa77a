//! Storage backend setup

use anyhow::{Context, Result};
use mxc_core::Config;
use mxc_storage::{LocalStorage, MediaStore};
use std::sync::Arc;

/// Create the media store rooted at the configured base path
pub async fn setup_storage(config: &Config) -> Result<Arc<dyn MediaStore>> {
    let storage = LocalStorage::new(config.base_path())
        .await
        .with_context(|| format!("Failed to initialize media storage at {}", config.base_path()))?;

    tracing::info!(base_path = %config.base_path(), "Local media storage initialized");

    Ok(Arc::new(storage))
}
