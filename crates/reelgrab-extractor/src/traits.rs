//! Extractor abstraction trait

use async_trait::async_trait;
use std::path::Path;

use crate::error::ExtractError;

/// Outcome of a successful extraction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractionReport {
    /// Content token the URL resolved to.
    pub shortcode: String,
    /// Account that published the post, when the remote service reports one.
    pub owner: Option<String>,
    /// Number of files written into the target directory.
    pub files_written: usize,
}

/// Given a post URL, produce zero or more video files in `target_dir`, or fail.
///
/// Implementations must validate the post reference before any network activity
/// and must only write inside `target_dir`.
#[async_trait]
pub trait MediaExtractor: Send + Sync {
    /// Human-readable name used in logs
    fn name(&self) -> &'static str;

    async fn fetch(&self, url: &str, target_dir: &Path) -> Result<ExtractionReport, ExtractError>;
}
