//! Change-notification ingestion: re-scan, classify, dedup, map.
//!
//! The simulator appends to its log files; the watcher only says *which*
//! file changed. Each notification therefore re-reads the whole file and
//! relies on the dedup store to skip rows that were already forwarded,
//! which also makes duplicate or coalesced notifications harmless.
//!
//! Per notification:
//!
//! 1. Classify the path into a [`classify::SourceKind`]; unrecognized files
//!    produce nothing.
//! 2. Extract the numeric file id; if the name carries none, the file's
//!    rows are skipped (recoverable, never a crash).
//! 3. Re-read the CSV. Rows whose identity columns do not parse are
//!    skipped individually; rows whose [`RecordKey`] is already recorded
//!    are skipped silently.
//! 4. Every remaining row is parsed, recorded, and mapped into one gauge
//!    batch, forwarded downstream as a single submission.

mod error;

pub use error::{IngestError, Result};

use std::fs::File;
use std::io::BufReader;
use std::path::Path;
use std::sync::Mutex;

use crate::classify;
use crate::dedup::{DedupStore, InMemoryStore};
use crate::kpm::{self, RecordKey, RequiredColumns, SUBSCRIBER_COLUMN, TIMESTAMP_COLUMN};
use crate::metrics::{self, Gauge};

/// Gauges derived from one newly seen row. Forwarded to the collector as a
/// single atomic submission.
pub type RowBatch = Vec<Gauge>;

/// Re-scans changed log files and turns newly seen rows into gauge batches.
///
/// Owns the dedup state; an internal lock serializes whole-file scans so
/// concurrent change notifications never interleave partial updates. At
/// most one file is being read and classified at any instant.
pub struct Ingestor<S = InMemoryStore> {
    store: Mutex<S>,
}

impl Ingestor<InMemoryStore> {
    pub fn new() -> Self {
        Self::with_store(InMemoryStore::default())
    }
}

impl Default for Ingestor<InMemoryStore> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: DedupStore> Ingestor<S> {
    /// Builds an ingestor around an existing dedup store.
    pub fn with_store(store: S) -> Self {
        Self {
            store: Mutex::new(store),
        }
    }

    /// Processes one change notification for `path`.
    ///
    /// Returns one gauge batch per data row that was not seen on an earlier
    /// scan; re-processing unchanged content returns no batches. Paths that
    /// classify as no known log file yield an empty result. Malformed rows
    /// are skipped individually and logged.
    ///
    /// # Errors
    ///
    /// Fails if the file cannot be opened, its header row cannot be read,
    /// or a required identity column is missing. No dedup state is mutated
    /// in any of these cases.
    pub fn process_file(&self, path: impl AsRef<Path>) -> Result<Vec<RowBatch>> {
        let path = path.as_ref();

        let Some(kind) = classify::classify(path) else {
            log::debug!("ignoring unrecognized file `{}`", path.display());
            return Ok(Vec::new());
        };
        let Some(file_id) = classify::file_id(path) else {
            log::warn!(
                "no numeric file id in `{}`; skipping its rows",
                path.display()
            );
            return Ok(Vec::new());
        };

        let mut store = self.store.lock().expect("ingest lock poisoned");

        let file = File::open(path).map_err(|source| IngestError::Open {
            path: path.to_path_buf(),
            source,
        })?;
        // Flexible: an in-progress append may leave the last line short.
        let mut reader = csv::ReaderBuilder::new()
            .flexible(true)
            .from_reader(BufReader::new(file));
        let headers = reader
            .headers()
            .map_err(|source| IngestError::Read {
                path: path.to_path_buf(),
                source,
            })?
            .clone();
        let required = RequiredColumns::locate(&headers).map_err(|source| IngestError::Header {
            path: path.to_path_buf(),
            source,
        })?;

        let mut batches = Vec::new();
        for record in reader.records() {
            let record = match record {
                Ok(record) => record,
                Err(err) => {
                    log::debug!("skipping unreadable row in `{}`: {}", path.display(), err);
                    continue;
                }
            };

            let (timestamp, subscriber) = match required.parse(&record) {
                Ok(identity) => identity,
                Err(err) => {
                    log::debug!("skipping row in `{}`: {}", path.display(), err);
                    continue;
                }
            };

            let key = RecordKey::new(timestamp, subscriber, kind);
            if store.contains(&key) {
                continue;
            }

            let row = match kpm::parse_row(&headers, &record, file_id) {
                Ok(row) => row,
                Err(err) => {
                    log::debug!("skipping row in `{}`: {}", path.display(), err);
                    continue;
                }
            };

            // Identity columns key the row; only measurement fields become
            // gauges.
            let batch: RowBatch = row
                .fields()
                .iter()
                .filter(|(field, _)| field != TIMESTAMP_COLUMN && field != SUBSCRIBER_COLUMN)
                .map(|(field, value)| {
                    metrics::map_field(kind, field, *value, subscriber, row.file_id())
                })
                .collect();

            store.record(key, row);
            batches.push(batch);
        }

        Ok(batches)
    }
}
