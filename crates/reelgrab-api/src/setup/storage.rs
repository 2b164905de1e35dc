//! Storage root initialization

use anyhow::{Context, Result};
use reelgrab_core::Config;
use reelgrab_storage::LocalStorage;

pub async fn setup_storage(config: &Config) -> Result<LocalStorage> {
    let storage = LocalStorage::new(&config.downloads_path, config.video_extensions.clone())
        .await
        .context("Failed to initialize download storage")?;

    tracing::info!(
        downloads_path = %config.downloads_path.display(),
        video_extensions = %config.video_extensions.join(","),
        "Download storage ready"
    );

    Ok(storage)
}
