//! Reelgrab Core Library
//!
//! This crate provides the error taxonomy, configuration, and wire models shared
//! by every Reelgrab component.

pub mod config;
pub mod constants;
pub mod error;
pub mod models;

// Re-export commonly used types
pub use config::Config;
pub use error::{AppError, ErrorMetadata, LogLevel};
pub use models::{DownloadId, DownloadRequest, DownloadResponse, StatusResponse};
