use chrono::Local;
use reelgrab_core::DownloadId;
use reelgrab_storage::LocalStorage;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

use crate::cleanup::schedule::RetentionSchedule;
use crate::in_flight::InFlightSet;

/// Counts from one sweep.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SweepReport {
    pub removed: usize,
    /// Directories left alone because their download is still running.
    pub skipped: usize,
    pub failed: usize,
}

/// Periodically wipes every download directory under the storage root.
pub struct RetentionManager {
    storage: LocalStorage,
    in_flight: InFlightSet,
    schedule: RetentionSchedule,
}

impl RetentionManager {
    pub fn new(storage: LocalStorage, in_flight: InFlightSet, schedule: RetentionSchedule) -> Self {
        Self {
            storage,
            in_flight,
            schedule,
        }
    }

    /// Start the background sweep loop on the configured hours (local time).
    /// Returns a handle for graceful shutdown.
    pub fn start(self: Arc<Self>) -> RetentionHandle {
        let (shutdown_tx, mut shutdown_rx) = mpsc::channel::<()>(1);

        tracing::info!(hours = ?self.schedule.hours(), "Retention manager started");

        let handle = tokio::spawn(async move {
            loop {
                let now = Local::now();
                let Some(next) = self.schedule.next_fire_after(&now) else {
                    tracing::warn!("Retention schedule has no hours, sweep loop idle");
                    let _ = shutdown_rx.recv().await;
                    break;
                };
                let wait = (next - now).to_std().unwrap_or(Duration::ZERO);
                tracing::debug!(next_run = %next, wait_secs = wait.as_secs(), "Next retention sweep scheduled");

                tokio::select! {
                    _ = shutdown_rx.recv() => break,
                    _ = tokio::time::sleep(wait) => {
                        tracing::info!("Starting scheduled retention sweep");
                        let report = self.sweep().await;
                        tracing::info!(
                            removed = report.removed,
                            skipped = report.skipped,
                            failed = report.failed,
                            "Retention sweep completed"
                        );
                    }
                }
            }
            tracing::info!("Retention manager stopped");
        });

        RetentionHandle {
            shutdown_tx,
            handle,
        }
    }

    /// Delete every directory directly under the storage root, except those of
    /// downloads still in flight. Plain files are left alone. Per-entry failures are
    /// logged and counted; the sweep always visits every entry.
    #[tracing::instrument(skip(self), fields(cleanup.operation = "sweep"))]
    pub async fn sweep(&self) -> SweepReport {
        let mut report = SweepReport::default();

        let entries = match self.storage.list_entries().await {
            Ok(Some(entries)) => entries,
            Ok(None) => {
                tracing::warn!(
                    path = %self.storage.base_path().display(),
                    "Storage root does not exist, nothing to sweep"
                );
                return report;
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to list storage root");
                return report;
            }
        };

        for entry in entries.into_iter().filter(|e| e.is_dir) {
            let in_flight = entry
                .name
                .parse::<DownloadId>()
                .map(|id| self.in_flight.contains(&id))
                .unwrap_or(false);
            if in_flight {
                tracing::debug!(entry = %entry.name, "Skipping in-flight download");
                report.skipped += 1;
                continue;
            }

            match self.storage.remove_dir(&entry.path).await {
                Ok(()) => report.removed += 1,
                Err(e) => {
                    tracing::error!(error = %e, entry = %entry.name, "Failed to remove download directory");
                    report.failed += 1;
                }
            }
        }

        report
    }
}

/// Owned handle to a running [`RetentionManager`] loop.
pub struct RetentionHandle {
    shutdown_tx: mpsc::Sender<()>,
    handle: JoinHandle<()>,
}

impl RetentionHandle {
    /// Stop the loop and wait for it to exit. A sweep already running completes first.
    pub async fn shutdown(self) {
        let _ = self.shutdown_tx.send(()).await;
        if let Err(e) = self.handle.await {
            tracing::error!(error = %e, "Retention task ended abnormally");
        }
    }

    pub fn is_finished(&self) -> bool {
        self.handle.is_finished()
    }
}
