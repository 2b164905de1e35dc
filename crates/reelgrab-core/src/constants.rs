//! Defaults shared by configuration and the HTTP layer.

/// Port the service listens on when `PORT` is not set.
pub const DEFAULT_PORT: u16 = 2500;

/// Storage root used when `DOWNLOADS_PATH` is not set.
pub const DEFAULT_DOWNLOADS_PATH: &str = "data/downloads";

/// Name reported by the status endpoint.
pub const DEFAULT_SERVICE_NAME: &str = "Instagram Video Downloader API";

/// File extensions considered retrievable video files.
pub const DEFAULT_VIDEO_EXTENSIONS: &[&str] = &["mp4", "mov"];

/// Hours of day (local time) at which the retention sweep fires.
pub const DEFAULT_CLEANUP_HOURS: &[u32] = &[3, 9, 15, 21];

/// Extractor binary looked up on `PATH` by default.
pub const DEFAULT_YTDLP_PATH: &str = "yt-dlp";

pub const DOWNLOAD_SUCCESS_MESSAGE: &str = "Video downloaded successfully";
pub const DOWNLOAD_NOT_FOUND: &str = "Download not found";
pub const VIDEO_FILE_NOT_FOUND: &str = "Video file not found";
pub const URL_REQUIRED: &str = "URL is required";
