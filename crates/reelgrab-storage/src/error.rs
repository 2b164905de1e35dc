//! Storage error types

use thiserror::Error;

/// Storage operation errors
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Download not found: {0}")]
    DownloadNotFound(String),

    #[error("Video file not found: {0}")]
    VideoNotFound(String),

    #[error("Create failed: {0}")]
    CreateFailed(String),

    #[error("Read failed: {0}")]
    ReadFailed(String),

    #[error("Delete failed: {0}")]
    DeleteFailed(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    ConfigError(String),
}

/// Result type for storage operations
pub type StorageResult<T> = Result<T, StorageError>;

impl From<StorageError> for reelgrab_core::AppError {
    fn from(err: StorageError) -> Self {
        use reelgrab_core::constants::{DOWNLOAD_NOT_FOUND, VIDEO_FILE_NOT_FOUND};
        use reelgrab_core::AppError;

        match err {
            StorageError::DownloadNotFound(_) => AppError::NotFound(DOWNLOAD_NOT_FOUND.to_string()),
            StorageError::VideoNotFound(_) => AppError::NotFound(VIDEO_FILE_NOT_FOUND.to_string()),
            StorageError::CreateFailed(msg)
            | StorageError::ReadFailed(msg)
            | StorageError::DeleteFailed(msg) => AppError::Storage(msg),
            StorageError::IoError(err) => AppError::Internal(format!("IO error: {}", err)),
            StorageError::ConfigError(msg) => AppError::Internal(msg),
        }
    }
}
