//! Tracing initialization
//!
//! Logs go to stdout through a non-blocking writer. When a log directory is configured
//! a second, non-ANSI layer writes daily-rolling `reelgrab.<date>.log` files.

use anyhow::Context;
use std::path::Path;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

const DEFAULT_FILTER: &str = "info,reelgrab_api=debug,reelgrab_services=debug,reelgrab_extractor=debug,reelgrab_storage=debug,tower_http=debug";
const LOG_FILE_PREFIX: &str = "reelgrab";

/// Flushes buffered log lines when dropped. Keep it alive for the life of the process.
#[must_use = "dropping the guard stops log output"]
pub struct TelemetryGuard {
    _guards: Vec<WorkerGuard>,
}

/// Initialize tracing. `RUST_LOG` overrides the default filter.
pub fn init_telemetry(service_name: &str, log_dir: Option<&Path>) -> anyhow::Result<TelemetryGuard> {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

    let (stdout_writer, stdout_guard) = tracing_appender::non_blocking(std::io::stdout());
    let mut guards = vec![stdout_guard];

    let file_layer = match log_dir {
        Some(dir) => {
            std::fs::create_dir_all(dir)
                .with_context(|| format!("Failed to create log directory {}", dir.display()))?;
            let appender = RollingFileAppender::builder()
                .rotation(Rotation::DAILY)
                .filename_prefix(LOG_FILE_PREFIX)
                .filename_suffix("log")
                .build(dir)
                .context("Failed to create rolling log file appender")?;
            let (file_writer, file_guard) = tracing_appender::non_blocking(appender);
            guards.push(file_guard);
            Some(
                fmt::layer()
                    .with_writer(file_writer)
                    .with_ansi(false)
                    .with_target(true),
            )
        }
        None => None,
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(stdout_writer).with_target(true))
        .with(file_layer)
        .try_init()
        .context("Failed to install tracing subscriber")?;

    tracing::info!(
        service = service_name,
        log_dir = ?log_dir.map(|d| d.display().to_string()),
        "Telemetry initialized"
    );

    Ok(TelemetryGuard { _guards: guards })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_init_with_log_dir_creates_directory() {
        let dir = tempfile::tempdir().unwrap();
        let log_dir = dir.path().join("logs");

        let guard = init_telemetry("test", Some(&log_dir)).unwrap();
        tracing::info!("hello from the telemetry test");
        drop(guard);

        assert!(log_dir.is_dir());
        // A second global subscriber cannot be installed.
        assert!(init_telemetry("test", None).is_err());
    }
}
