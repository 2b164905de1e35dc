//! Reelgrab Extractor Library
//!
//! Turns a post URL into video files on disk. The crate owns three concerns:
//!
//! - recognizing a post reference (`/p/`, `/reel/`, `/tv/`) and its content token,
//! - the [`MediaExtractor`] seam the download service depends on,
//! - [`YtDlpExtractor`], the production implementation driving the `yt-dlp` tool.
//!
//! Every failure is returned as an [`ExtractError`] value; nothing here panics on
//! remote or process errors.

pub mod error;
pub mod post;
pub mod traits;
pub mod ytdlp;

pub use error::{ExtractError, ExtractErrorKind};
pub use post::{PostKind, PostReference};
pub use traits::{ExtractionReport, MediaExtractor};
pub use ytdlp::{ExtractorConfig, YtDlpExtractor};
