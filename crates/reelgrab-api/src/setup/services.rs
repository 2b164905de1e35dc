//! Service wiring: extractor, download service and retention manager

use crate::state::AppState;
use anyhow::Result;
use reelgrab_core::Config;
use reelgrab_extractor::{ExtractorConfig, MediaExtractor, YtDlpExtractor};
use reelgrab_services::{
    DownloadService, InFlightSet, RetentionManager, RetentionSchedule,
};
use reelgrab_storage::LocalStorage;
use std::path::PathBuf;
use std::sync::Arc;

pub fn build_extractor(config: &Config) -> Arc<dyn MediaExtractor> {
    let extractor = YtDlpExtractor::new(ExtractorConfig {
        binary: PathBuf::from(&config.ytdlp_path),
        extra_args: Vec::new(),
        cookies_file: config.ytdlp_cookies_file.clone(),
    });
    tracing::info!(
        extractor = extractor.name(),
        binary = %config.ytdlp_path,
        cookies = config.ytdlp_cookies_file.is_some(),
        "Extractor configured"
    );
    Arc::new(extractor)
}

/// Build the application state. Starts the retention loop when cleanup is enabled.
pub async fn initialize_services(
    config: &Config,
    storage: LocalStorage,
    extractor: Arc<dyn MediaExtractor>,
) -> Result<Arc<AppState>> {
    let in_flight = InFlightSet::new();
    let downloads = DownloadService::new(storage.clone(), extractor, in_flight.clone());

    let retention = if config.cleanup_enabled {
        let schedule = RetentionSchedule::new(config.cleanup_hours.iter().copied());
        let manager = Arc::new(RetentionManager::new(storage, in_flight, schedule));
        Some(manager.start())
    } else {
        tracing::info!("Retention manager disabled (CLEANUP_ENABLED=false)");
        None
    };

    Ok(Arc::new(AppState::new(config.clone(), downloads, retention)))
}
