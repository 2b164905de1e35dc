use crate::error::{StorageError, StorageResult};
use bytes::Bytes;
use futures::{Stream, StreamExt};
use reelgrab_core::DownloadId;
use std::path::{Path, PathBuf};
use std::pin::Pin;
use std::time::Instant;
use tokio::fs;

/// Byte stream of a stored video file.
pub type VideoStream = Pin<Box<dyn Stream<Item = Result<Bytes, StorageError>> + Send>>;

/// A video file located inside a download directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredVideo {
    pub download_id: DownloadId,
    pub path: PathBuf,
    pub file_name: String,
    pub size_bytes: u64,
    pub content_type: &'static str,
}

/// One entry directly under the storage root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StorageEntry {
    pub name: String,
    pub path: PathBuf,
    pub is_dir: bool,
}

/// Local filesystem storage for downloads
#[derive(Clone, Debug)]
pub struct LocalStorage {
    base_path: PathBuf,
    video_extensions: Vec<String>,
}

impl LocalStorage {
    /// Create a new LocalStorage instance
    ///
    /// # Arguments
    /// * `base_path` - Storage root (e.g., "data/downloads"); created if missing
    /// * `video_extensions` - Extensions (without dot) that count as video files
    pub async fn new(
        base_path: impl Into<PathBuf>,
        video_extensions: Vec<String>,
    ) -> StorageResult<Self> {
        let base_path = base_path.into();

        fs::create_dir_all(&base_path).await.map_err(|e| {
            StorageError::ConfigError(format!(
                "Failed to create storage directory {}: {}",
                base_path.display(),
                e
            ))
        })?;

        Ok(LocalStorage {
            base_path,
            video_extensions: video_extensions
                .into_iter()
                .map(|ext| ext.trim_start_matches('.').to_lowercase())
                .collect(),
        })
    }

    pub fn base_path(&self) -> &Path {
        &self.base_path
    }

    /// Directory for a download. Identifiers are UUIDs, so the result always stays
    /// directly under the storage root.
    pub fn download_dir(&self, id: &DownloadId) -> PathBuf {
        self.base_path.join(id.to_string())
    }

    /// Create the directory a download writes into.
    pub async fn create_download_dir(&self, id: &DownloadId) -> StorageResult<PathBuf> {
        let path = self.download_dir(id);

        fs::create_dir_all(&path).await.map_err(|e| {
            StorageError::CreateFailed(format!(
                "Failed to create download directory {}: {}",
                path.display(),
                e
            ))
        })?;

        tracing::debug!(download_id = %id, path = %path.display(), "Created download directory");
        Ok(path)
    }

    pub async fn download_exists(&self, id: &DownloadId) -> bool {
        fs::try_exists(self.download_dir(id)).await.unwrap_or(false)
    }

    fn is_video_file(&self, file_name: &str) -> bool {
        Path::new(file_name)
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| {
                let ext = ext.to_lowercase();
                self.video_extensions.iter().any(|allowed| *allowed == ext)
            })
    }

    /// Locate the video file of a download.
    ///
    /// Scans the download directory non-recursively. When several files match, the
    /// lexicographically smallest file name wins so the answer does not depend on
    /// directory listing order.
    pub async fn find_video(&self, id: &DownloadId) -> StorageResult<StoredVideo> {
        let dir = self.download_dir(id);

        let mut entries = match fs::read_dir(&dir).await {
            Ok(entries) => entries,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Err(StorageError::DownloadNotFound(id.to_string()));
            }
            Err(e) => {
                return Err(StorageError::ReadFailed(format!(
                    "Failed to list {}: {}",
                    dir.display(),
                    e
                )));
            }
        };

        let mut best: Option<(String, PathBuf, u64)> = None;
        while let Some(entry) = entries.next_entry().await? {
            let metadata = match entry.metadata().await {
                Ok(metadata) => metadata,
                Err(e) => {
                    tracing::debug!(error = %e, path = %entry.path().display(), "Skipping unreadable entry");
                    continue;
                }
            };
            if !metadata.is_file() {
                continue;
            }
            let Some(file_name) = entry.file_name().to_str().map(String::from) else {
                continue;
            };
            if !self.is_video_file(&file_name) {
                continue;
            }
            if best.as_ref().is_none_or(|(current, _, _)| file_name < *current) {
                best = Some((file_name, entry.path(), metadata.len()));
            }
        }

        let (file_name, path, size_bytes) =
            best.ok_or_else(|| StorageError::VideoNotFound(id.to_string()))?;

        Ok(StoredVideo {
            download_id: *id,
            content_type: content_type_for(&file_name),
            path,
            file_name,
            size_bytes,
        })
    }

    /// Open a stored video as a byte stream.
    ///
    /// The file handle is opened before the stream is returned, so a retention sweep
    /// that unlinks the file afterwards does not interrupt the transfer on Unix.
    pub async fn open_video_stream(&self, video: &StoredVideo) -> StorageResult<VideoStream> {
        let start = Instant::now();

        let file = fs::File::open(&video.path).await.map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                StorageError::VideoNotFound(video.download_id.to_string())
            } else {
                StorageError::ReadFailed(format!(
                    "Failed to open file {}: {}",
                    video.path.display(),
                    e
                ))
            }
        })?;

        let path_display = video.path.display().to_string();
        let stream = tokio_util::io::ReaderStream::new(file).map(move |item| {
            item.map_err(|e| {
                tracing::error!(
                    path = %path_display,
                    error = %e,
                    duration_ms = start.elapsed().as_secs_f64() * 1000.0,
                    "Local storage stream read error"
                );
                StorageError::ReadFailed(format!("Failed to read chunk: {}", e))
            })
        });

        Ok(Box::pin(stream))
    }

    /// Every entry directly under the storage root. A missing root yields `Ok(None)`.
    pub async fn list_entries(&self) -> StorageResult<Option<Vec<StorageEntry>>> {
        let mut entries = match fs::read_dir(&self.base_path).await {
            Ok(entries) => entries,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };

        let mut listed = Vec::new();
        while let Some(entry) = entries.next_entry().await? {
            let is_dir = entry
                .file_type()
                .await
                .map(|t| t.is_dir())
                .unwrap_or(false);
            listed.push(StorageEntry {
                name: entry.file_name().to_string_lossy().to_string(),
                path: entry.path(),
                is_dir,
            });
        }

        Ok(Some(listed))
    }

    /// Recursively delete one directory under the storage root.
    pub async fn remove_dir(&self, path: &Path) -> StorageResult<()> {
        if path.parent() != Some(self.base_path.as_path()) {
            return Err(StorageError::DeleteFailed(format!(
                "{} is not a direct child of the storage root",
                path.display()
            )));
        }

        let start = Instant::now();
        fs::remove_dir_all(path).await.map_err(|e| {
            StorageError::DeleteFailed(format!(
                "Failed to delete directory {}: {}",
                path.display(),
                e
            ))
        })?;

        tracing::info!(
            path = %path.display(),
            duration_ms = start.elapsed().as_secs_f64() * 1000.0,
            "Deleted download directory"
        );
        Ok(())
    }
}

fn content_type_for(file_name: &str) -> &'static str {
    let ext = Path::new(file_name)
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_lowercase());
    match ext.as_deref() {
        Some("mp4") => "video/mp4",
        Some("mov") => "video/quicktime",
        Some("webm") => "video/webm",
        Some("mkv") => "video/x-matroska",
        Some("m4v") => "video/x-m4v",
        _ => "application/octet-stream",
    }
}
