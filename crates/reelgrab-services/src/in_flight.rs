//! Registry of downloads whose extraction is still running.
//!
//! The retention sweep consults this set so it never removes a directory that an
//! extractor is writing into. Registration happens before the directory exists and is
//! released when the [`InFlightGuard`] drops, including on early returns and panics.

use reelgrab_core::DownloadId;
use std::collections::HashSet;
use std::sync::{Arc, Mutex, MutexGuard};

#[derive(Clone, Debug, Default)]
pub struct InFlightSet {
    inner: Arc<Mutex<HashSet<DownloadId>>>,
}

impl InFlightSet {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, HashSet<DownloadId>> {
        // The set holds plain ids; a panic while locked cannot leave it inconsistent.
        self.inner.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Mark `id` as in flight until the returned guard is dropped.
    pub fn register(&self, id: DownloadId) -> InFlightGuard {
        self.lock().insert(id);
        InFlightGuard {
            set: self.clone(),
            id,
        }
    }

    pub fn contains(&self, id: &DownloadId) -> bool {
        self.lock().contains(id)
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }
}

/// Releases its download from the [`InFlightSet`] on drop.
#[derive(Debug)]
pub struct InFlightGuard {
    set: InFlightSet,
    id: DownloadId,
}

impl InFlightGuard {
    pub fn id(&self) -> DownloadId {
        self.id
    }
}

impl Drop for InFlightGuard {
    fn drop(&mut self) {
        self.set.lock().remove(&self.id);
    }
}
