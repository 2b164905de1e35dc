//! Deterministic stand-in for the yt-dlp extractor.

#![allow(dead_code)]

use async_trait::async_trait;
use reelgrab_extractor::{ExtractError, ExtractionReport, MediaExtractor, PostReference};
use std::path::Path;

/// Behavior is chosen by the post's content token:
///
/// - `ABC...` writes `video.mp4` containing `video:<token>`
/// - `MULTI...` writes `b.mp4`, `a.mov` and `cover.jpg`
/// - `FAIL...` fails as an upstream error
/// - anything else reports a post without video
pub struct ScriptedExtractor;

pub fn video_bytes(token: &str) -> Vec<u8> {
    format!("video:{}", token).into_bytes()
}

#[async_trait]
impl MediaExtractor for ScriptedExtractor {
    fn name(&self) -> &'static str {
        "scripted"
    }

    async fn fetch(&self, url: &str, target_dir: &Path) -> Result<ExtractionReport, ExtractError> {
        let post = PostReference::parse(url)?;
        let token = post.shortcode.clone();

        let files_written = if token.starts_with("ABC") {
            tokio::fs::write(target_dir.join("video.mp4"), video_bytes(&token)).await?;
            1
        } else if token.starts_with("MULTI") {
            tokio::fs::write(target_dir.join("b.mp4"), b"second").await?;
            tokio::fs::write(target_dir.join("a.mov"), b"first").await?;
            tokio::fs::write(target_dir.join("cover.jpg"), b"image").await?;
            3
        } else if token.starts_with("FAIL") {
            return Err(ExtractError::Upstream(
                "HTTP Error 404: Not Found".to_string(),
            ));
        } else {
            return Err(ExtractError::NoVideo);
        };

        Ok(ExtractionReport {
            shortcode: token,
            owner: Some("test_account".to_string()),
            files_written,
        })
    }
}
