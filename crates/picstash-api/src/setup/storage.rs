//! Storage setup and initialization

use anyhow::{Context, Result};
use picstash_core::Config;
use picstash_storage::{LocalStorage, Storage};
use std::sync::Arc;

/// Create the upload root (recursively) and the storage backend over it
pub async fn setup_storage(config: &Config) -> Result<Arc<dyn Storage>> {
    tracing::info!(upload_dir = %config.upload_dir.display(), "Initializing storage...");

    let storage = LocalStorage::new(&config.upload_dir)
        .await
        .with_context(|| {
            format!(
                "Failed to initialize upload directory {}",
                config.upload_dir.display()
            )
        })?;

    tracing::info!("Storage initialized successfully");
    Ok(Arc::new(storage))
}
