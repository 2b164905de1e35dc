use reelgrab_core::Config;
use reelgrab_services::{DownloadService, RetentionHandle};
use tokio::sync::Mutex;

pub struct AppState {
    pub config: Config,
    pub downloads: DownloadService,
    /// Running retention loop, if cleanup is enabled. Taken on shutdown.
    retention: Mutex<Option<RetentionHandle>>,
}

impl AppState {
    pub fn new(config: Config, downloads: DownloadService, retention: Option<RetentionHandle>) -> Self {
        Self {
            config,
            downloads,
            retention: Mutex::new(retention),
        }
    }

    pub async fn retention_running(&self) -> bool {
        self.retention
            .lock()
            .await
            .as_ref()
            .is_some_and(|handle| !handle.is_finished())
    }

    /// Stop background work owned by the application. Safe to call more than once.
    pub async fn shutdown(&self) {
        if let Some(handle) = self.retention.lock().await.take() {
            tracing::info!("Stopping retention manager");
            handle.shutdown().await;
        }
    }
}
