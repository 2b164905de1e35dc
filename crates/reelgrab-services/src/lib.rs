//! Reelgrab Services Layer
//!
//! This crate is the **business service layer**: it coordinates the extractor and
//! local storage for one download at a time ([`DownloadService`]) and owns the
//! periodic wipe of the storage root ([`RetentionManager`]). Keep business logic and
//! coordination here; keep thin HTTP handling in reelgrab-api.

pub mod cleanup;
pub mod download;
pub mod in_flight;

pub use cleanup::schedule::RetentionSchedule;
pub use cleanup::service::{RetentionHandle, RetentionManager, SweepReport};
pub use download::service::{DownloadOutcome, DownloadService};
pub use in_flight::{InFlightGuard, InFlightSet};
pub use reelgrab_extractor::{
    ExtractError, ExtractErrorKind, ExtractorConfig, MediaExtractor, YtDlpExtractor,
};
pub use reelgrab_storage::{LocalStorage, StorageError, StoredVideo, VideoStream};
