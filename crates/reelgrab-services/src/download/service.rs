use reelgrab_core::constants::{DOWNLOAD_NOT_FOUND, DOWNLOAD_SUCCESS_MESSAGE};
use reelgrab_core::{AppError, DownloadId};
use reelgrab_extractor::{ExtractErrorKind, MediaExtractor};
use reelgrab_storage::{LocalStorage, StoredVideo, VideoStream};
use std::sync::Arc;

use crate::in_flight::InFlightSet;

/// Result of one download attempt. A failed extraction is still an outcome: its
/// directory exists and its id is returned.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DownloadOutcome {
    pub download_id: DownloadId,
    pub success: bool,
    pub message: String,
    /// Content token of the post, on success.
    pub shortcode: Option<String>,
    /// Failure class, set when `success` is false.
    pub error_kind: Option<ExtractErrorKind>,
}

#[derive(Clone)]
pub struct DownloadService {
    storage: LocalStorage,
    extractor: Arc<dyn MediaExtractor>,
    in_flight: InFlightSet,
}

impl DownloadService {
    pub fn new(
        storage: LocalStorage,
        extractor: Arc<dyn MediaExtractor>,
        in_flight: InFlightSet,
    ) -> Self {
        Self {
            storage,
            extractor,
            in_flight,
        }
    }

    pub fn storage(&self) -> &LocalStorage {
        &self.storage
    }

    pub fn in_flight(&self) -> &InFlightSet {
        &self.in_flight
    }

    /// Run one download under a fresh identifier.
    ///
    /// Returns `Err` only when the download directory cannot be prepared; extractor
    /// failures come back as an unsuccessful [`DownloadOutcome`].
    #[tracing::instrument(skip(self), fields(extractor = self.extractor.name(), download_id = tracing::field::Empty))]
    pub async fn submit(&self, url: &str) -> Result<DownloadOutcome, AppError> {
        let download_id = DownloadId::new();
        tracing::Span::current().record("download_id", tracing::field::display(download_id));

        let _guard = self.in_flight.register(download_id);
        let target_dir = self.storage.create_download_dir(&download_id).await?;

        match self.extractor.fetch(url, &target_dir).await {
            Ok(report) => {
                tracing::info!(
                    download_id = %download_id,
                    shortcode = %report.shortcode,
                    owner = report.owner.as_deref().unwrap_or("-"),
                    files_written = report.files_written,
                    "Download completed"
                );
                Ok(DownloadOutcome {
                    download_id,
                    success: true,
                    message: DOWNLOAD_SUCCESS_MESSAGE.to_string(),
                    shortcode: Some(report.shortcode),
                    error_kind: None,
                })
            }
            Err(e) => {
                tracing::warn!(
                    download_id = %download_id,
                    error = %e,
                    code = e.kind().code(),
                    "Download failed"
                );
                Ok(DownloadOutcome {
                    download_id,
                    success: false,
                    message: e.to_string(),
                    shortcode: None,
                    error_kind: Some(e.kind()),
                })
            }
        }
    }

    /// Locate the video of a download. Unparsable ids are reported the same way as
    /// unknown ones.
    #[tracing::instrument(skip(self))]
    pub async fn retrieve(&self, download_id: &str) -> Result<StoredVideo, AppError> {
        let id: DownloadId = download_id
            .parse()
            .map_err(|_| AppError::NotFound(DOWNLOAD_NOT_FOUND.to_string()))?;

        let video = self.storage.find_video(&id).await?;
        tracing::debug!(
            download_id = %id,
            file_name = %video.file_name,
            size_bytes = video.size_bytes,
            "Resolved video file"
        );
        Ok(video)
    }

    pub async fn open(&self, video: &StoredVideo) -> Result<VideoStream, AppError> {
        Ok(self.storage.open_video_stream(video).await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use futures::StreamExt;
    use reelgrab_core::constants::VIDEO_FILE_NOT_FOUND;
    use reelgrab_extractor::{ExtractError, ExtractionReport, PostReference};
    use std::path::Path;
    use tempfile::TempDir;

    /// Writes `video.mp4` for posts whose token starts with "ABC", reports no video
    /// otherwise. Records whether each target directory was in flight during fetch.
    struct ScriptedExtractor {
        in_flight: InFlightSet,
    }

    #[async_trait]
    impl MediaExtractor for ScriptedExtractor {
        fn name(&self) -> &'static str {
            "scripted"
        }

        async fn fetch(
            &self,
            url: &str,
            target_dir: &Path,
        ) -> Result<ExtractionReport, ExtractError> {
            let post = PostReference::parse(url)?;

            let id: DownloadId = target_dir
                .file_name()
                .and_then(|n| n.to_str())
                .and_then(|n| n.parse().ok())
                .ok_or_else(|| ExtractError::Unexpected("bad target dir".to_string()))?;
            if !self.in_flight.contains(&id) {
                return Err(ExtractError::Unexpected("not registered".to_string()));
            }

            if !post.shortcode.starts_with("ABC") {
                return Err(ExtractError::NoVideo);
            }

            tokio::fs::write(target_dir.join("video.mp4"), post.shortcode.as_bytes()).await?;
            Ok(ExtractionReport {
                shortcode: post.shortcode,
                owner: Some("someone".to_string()),
                files_written: 1,
            })
        }
    }

    async fn service() -> (DownloadService, TempDir) {
        let dir = TempDir::new().unwrap();
        let storage = LocalStorage::new(dir.path(), vec!["mp4".to_string(), "mov".to_string()])
            .await
            .unwrap();
        let in_flight = InFlightSet::new();
        let extractor = Arc::new(ScriptedExtractor {
            in_flight: in_flight.clone(),
        });
        (DownloadService::new(storage, extractor, in_flight), dir)
    }

    #[tokio::test]
    async fn test_submit_then_retrieve_round_trip() {
        let (service, _dir) = service().await;

        let outcome = service
            .submit("https://instagram.com/p/ABC123/")
            .await
            .unwrap();
        assert!(outcome.success, "{}", outcome.message);
        assert_eq!(outcome.message, DOWNLOAD_SUCCESS_MESSAGE);
        assert_eq!(outcome.shortcode.as_deref(), Some("ABC123"));
        assert!(service.in_flight().is_empty());

        let video = service
            .retrieve(&outcome.download_id.to_string())
            .await
            .unwrap();
        assert_eq!(video.file_name, "video.mp4");

        let mut stream = service.open(&video).await.unwrap();
        let mut bytes = Vec::new();
        while let Some(chunk) = stream.next().await {
            bytes.extend_from_slice(&chunk.unwrap());
        }
        assert_eq!(bytes, b"ABC123");
    }

    #[tokio::test]
    async fn test_no_video_post_keeps_directory() {
        let (service, _dir) = service().await;

        let outcome = service.submit("https://instagram.com/p/XYZ/").await.unwrap();
        assert!(!outcome.success);
        assert_eq!(outcome.error_kind, Some(ExtractErrorKind::NoVideo));
        assert_eq!(
            outcome.message,
            "The Instagram post does not contain a video"
        );
        assert!(service.storage().download_exists(&outcome.download_id).await);

        let err = service
            .retrieve(&outcome.download_id.to_string())
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), format!("Not found: {}", VIDEO_FILE_NOT_FOUND));
    }

    #[tokio::test]
    async fn test_invalid_url_is_distinguishable() {
        let (service, _dir) = service().await;

        let outcome = service
            .submit("https://example.com/not-instagram")
            .await
            .unwrap();
        assert!(!outcome.success);
        assert_eq!(outcome.error_kind, Some(ExtractErrorKind::InvalidPostUrl));
        assert_eq!(outcome.message, "Could not extract post shortcode from URL");
    }

    #[tokio::test]
    async fn test_retrieve_unknown_and_malformed_ids() {
        let (service, _dir) = service().await;

        for id in [DownloadId::new().to_string(), "../etc".to_string()] {
            let err = service.retrieve(&id).await.unwrap_err();
            assert_eq!(err.to_string(), format!("Not found: {}", DOWNLOAD_NOT_FOUND));
        }
    }

    #[tokio::test]
    async fn test_concurrent_submits_get_distinct_ids() {
        let (service, dir) = service().await;

        let (a, b) = tokio::join!(
            service.submit("https://instagram.com/reel/ABC1/"),
            service.submit("https://instagram.com/reel/ABC2/")
        );
        let (a, b) = (a.unwrap(), b.unwrap());

        assert!(a.success && b.success);
        assert_ne!(a.download_id, b.download_id);
        assert!(dir.path().join(a.download_id.to_string()).is_dir());
        assert!(dir.path().join(b.download_id.to_string()).is_dir());
    }
}
