//! Read-Through Source Cache
//!
//! Keeps the parsed content of each backing resource in memory and re-reads
//! it only when the resource's modification marker changes.
//!
//! The marker is queried before the read, so a recorded marker is never newer
//! than the data stored next to it. If the resource changes between the two
//! calls, the next `read` sees a mismatch and loads it again.
//!
//! Concurrent cold reads of the same id are not coalesced: each caller loads
//! the resource and the last insert wins. No I/O happens while the map lock is
//! held.

use std::collections::HashMap;
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

use tracing::{debug, warn};

use crate::error::SourceReadError;
use crate::source::SourceLoader;

// == Source Entry ==
/// Cached content of one resource and the marker it was read at.
#[derive(Debug)]
struct SourceEntry<M, D> {
    data: Arc<D>,
    marker: M,
}

type Entries<L> =
    HashMap<String, SourceEntry<<L as SourceLoader>::Marker, <L as SourceLoader>::Data>>;

// == Source Cache ==
/// Read-through cache over a [`SourceLoader`].
pub struct SourceCache<L: SourceLoader> {
    loader: L,
    entries: RwLock<Entries<L>>,
}

impl<L: SourceLoader> SourceCache<L> {
    // == Constructor ==
    pub fn new(loader: L) -> Self {
        Self {
            loader,
            entries: RwLock::new(HashMap::new()),
        }
    }

    pub fn loader(&self) -> &L {
        &self.loader
    }

    // == Read ==
    /// Returns the content of `source_id`, reloading it if its marker moved.
    ///
    /// On failure the previous entry, if any, is kept as it was: a failed
    /// refresh never discards last known good data, and only a later
    /// successful read replaces it.
    pub fn read(&self, source_id: &str) -> Result<Arc<L::Data>, SourceReadError> {
        let marker = self
            .loader
            .modification_marker(source_id)
            .map_err(|e| self.failure(source_id, e))?;

        if let Some(entry) = self.read_entries().get(source_id) {
            if entry.marker == marker {
                return Ok(Arc::clone(&entry.data));
            }
            debug!(source_id, "source changed, reloading");
        } else {
            debug!(source_id, "source not cached, loading");
        }

        let data = Arc::new(
            self.loader
                .read_and_parse(source_id)
                .map_err(|e| self.failure(source_id, e))?,
        );

        self.write_entries().insert(
            source_id.to_string(),
            SourceEntry {
                data: Arc::clone(&data),
                marker,
            },
        );

        Ok(data)
    }

    // == Invalidate ==
    /// Forgets one resource, or all of them when `source_id` is `None`.
    pub fn invalidate(&self, source_id: Option<&str>) -> usize {
        let mut entries = self.write_entries();
        match source_id {
            Some(id) => usize::from(entries.remove(id).is_some()),
            None => {
                let count = entries.len();
                entries.clear();
                count
            }
        }
    }

    pub fn contains(&self, source_id: &str) -> bool {
        self.read_entries().contains_key(source_id)
    }

    pub fn len(&self) -> usize {
        self.read_entries().len()
    }

    pub fn is_empty(&self) -> bool {
        self.read_entries().is_empty()
    }

    // == Helpers ==
    fn failure(&self, source_id: &str, cause: L::Error) -> SourceReadError {
        warn!(source_id, error = %cause, "source read failed");
        SourceReadError::new(source_id, cause)
    }

    // Entries are replaced whole, so a poisoned lock still guards a
    // consistent map.
    fn read_entries(&self) -> RwLockReadGuard<'_, Entries<L>> {
        self.entries.read().unwrap_or_else(|e| e.into_inner())
    }

    fn write_entries(&self) -> RwLockWriteGuard<'_, Entries<L>> {
        self.entries.write().unwrap_or_else(|e| e.into_inner())
    }
}

impl<L: SourceLoader + std::fmt::Debug> std::fmt::Debug for SourceCache<L> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SourceCache")
            .field("loader", &self.loader)
            .field("entries", &self.len())
            .finish()
    }
}
