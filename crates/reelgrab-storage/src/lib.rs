//! Reelgrab Storage Library
//!
//! Local filesystem layout for downloads.
//!
//! # Layout
//!
//! One storage root holds one subdirectory per download, named by its
//! [`DownloadId`](reelgrab_core::DownloadId):
//!
//! - `{root}/{download_id}/{media files as written by the extractor}`
//!
//! Directory names come only from parsed identifiers, so no path handed to the
//! filesystem is derived from raw client input.

pub mod error;
pub mod local;

pub use error::{StorageError, StorageResult};
pub use local::{LocalStorage, StorageEntry, StoredVideo, VideoStream};
