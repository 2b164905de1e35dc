//! Test helpers: build AppState and router for integration tests.
//!
//! Run from workspace root: `cargo test -p reelgrab-api`. The extractor is replaced
//! by [`ScriptedExtractor`], so no network access or yt-dlp install is needed.

#![allow(dead_code)]

pub mod extractor;

use axum_test::TestServer;
use reelgrab_api::setup::{routes, services};
use reelgrab_api::state::AppState;
use reelgrab_core::Config;
use reelgrab_storage::LocalStorage;
use std::sync::Arc;
use tempfile::TempDir;

pub use extractor::ScriptedExtractor;

/// Test application: server, state, and owned resources.
pub struct TestApp {
    pub server: TestServer,
    pub state: Arc<AppState>,
    pub temp_dir: TempDir,
}

impl TestApp {
    pub fn client(&self) -> &TestServer {
        &self.server
    }

    pub fn downloads_path(&self) -> &std::path::Path {
        self.temp_dir.path()
    }
}

pub fn create_test_config(temp_dir: &TempDir) -> Config {
    Config {
        downloads_path: temp_dir.path().to_path_buf(),
        service_name: "Reelgrab Test".to_string(),
        cleanup_enabled: false,
        ..Config::default()
    }
}

/// Setup test app with isolated storage and a scripted extractor.
pub async fn setup_test_app() -> TestApp {
    let temp_dir = tempfile::tempdir().expect("Failed to create temp directory");
    let config = create_test_config(&temp_dir);
    setup_test_app_with_config(config, temp_dir).await
}

pub async fn setup_test_app_with_config(config: Config, temp_dir: TempDir) -> TestApp {
    let storage = LocalStorage::new(&config.downloads_path, config.video_extensions.clone())
        .await
        .expect("Failed to create local storage");

    let state = services::initialize_services(&config, storage, Arc::new(ScriptedExtractor))
        .await
        .expect("Failed to initialize services");

    let router = routes::setup_routes(&config, state.clone())
        .await
        .expect("Failed to setup routes");

    let server = TestServer::new(router).expect("Failed to create test server");

    TestApp {
        server,
        state,
        temp_dir,
    }
}
