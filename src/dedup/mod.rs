//! Dedup state for measurements that were already forwarded.
//!
//! Every change notification re-reads the whole log file, so most rows of a
//! growing file have been seen on an earlier scan. The store remembers which
//! [`RecordKey`]s were emitted and keeps the parsed row for each, making the
//! pipeline idempotent across repeated notifications.

use std::collections::HashMap;

use crate::kpm::{KpmRow, RecordKey};

/// Store of measurement rows that have already been emitted.
///
/// Implementations answer membership queries and record newly emitted rows.
/// Access is always serialized by the ingestor's lock, so implementations
/// need no internal synchronization.
pub trait DedupStore {
    /// Returns whether metrics for `key` were already emitted.
    fn contains(&self, key: &RecordKey) -> bool;

    /// Records an emitted row.
    ///
    /// A key is recorded at most once; recording an already present key is
    /// a no-op and leaves the stored row untouched.
    fn record(&mut self, key: RecordKey, row: KpmRow);
}

/// Unbounded in-memory store.
///
/// Growth is monotonic and there is no eviction: the process lifetime is
/// bounded by one simulation run, and retaining every key is what guarantees
/// a row is never emitted twice. A retention policy would go behind
/// [`DedupStore`] without touching the ingestor.
#[derive(Debug, Default)]
pub struct InMemoryStore {
    rows: HashMap<RecordKey, KpmRow>,
}

impl InMemoryStore {
    /// Number of distinct measurement rows recorded so far.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

impl DedupStore for InMemoryStore {
    fn contains(&self, key: &RecordKey) -> bool {
        self.rows.contains_key(key)
    }

    fn record(&mut self, key: RecordKey, row: KpmRow) {
        self.rows.entry(key).or_insert(row);
    }
}
