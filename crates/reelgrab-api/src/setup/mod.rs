//! Application setup and initialization
//!
//! This module contains all application initialization logic extracted from main.rs
//! for better organization and testability.

pub mod routes;
pub mod server;
pub mod services;
pub mod storage;
pub mod validation;

use crate::state::AppState;
use anyhow::{Context, Result};
use reelgrab_core::Config;
use std::sync::Arc;

/// Initialize the entire application with the production extractor.
///
/// Tracing must already be initialized by the caller.
pub async fn initialize_app(config: Config) -> Result<(Arc<AppState>, axum::Router)> {
    // Validate configuration first - fail fast on misconfiguration
    validation::validate_config(&config).context("Configuration validation failed")?;

    tracing::info!("Configuration loaded and validated successfully");

    let storage = storage::setup_storage(&config).await?;
    let extractor = services::build_extractor(&config);

    let state = services::initialize_services(&config, storage, extractor).await?;

    let router = routes::setup_routes(&config, state.clone()).await?;

    Ok((state, router))
}
