//! Parsing and modeling of KPM (key performance measurement) rows.
//!
//! Simulator logs are append-only CSV files whose first line names the
//! columns. Two columns identify a row: `timestamp` (simulation time,
//! integer) and `ueImsiComplete` (subscriber identity, integer). Every other
//! column is a numeric measurement; an empty cell means the reading is
//! absent for that row, which is distinct from a zero reading.
//!
//! # Main types
//!
//! - [`RecordKey`]: identity of one measurement instance, used to avoid
//!   re-emitting rows observed on earlier re-scans of the same file.
//! - [`KpmRow`]: the ordered measurement fields of one row, with empty
//!   cells dropped, plus the numeric identifier taken from the file name.
//! - [`RequiredColumns`]: locates and parses the identity columns.

mod error;
mod parser;

pub use error::RowParseError;
pub use parser::{RequiredColumns, parse_row};

use crate::classify::SourceKind;

/// Column holding the simulation timestamp.
pub const TIMESTAMP_COLUMN: &str = "timestamp";
/// Column holding the subscriber identity (IMSI).
pub const SUBSCRIBER_COLUMN: &str = "ueImsiComplete";

/// Identity of one measurement instance: a subscriber's reading at one
/// simulation timestamp from one source family.
///
/// Two rows with the same key are the same measurement, typically because
/// the whole file was re-scanned after an append.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RecordKey {
    timestamp: u64,
    subscriber: u64,
    kind: SourceKind,
}

impl RecordKey {
    pub fn new(timestamp: u64, subscriber: u64, kind: SourceKind) -> Self {
        Self {
            timestamp,
            subscriber,
            kind,
        }
    }

    pub fn timestamp(&self) -> u64 {
        self.timestamp
    }

    pub fn subscriber(&self) -> u64 {
        self.subscriber
    }

    pub fn kind(&self) -> SourceKind {
        self.kind
    }
}

/// One parsed data row: measurement fields in header order with empty cells
/// dropped, plus the cell/file identifier the row was read from.
#[derive(Debug, Clone, PartialEq)]
pub struct KpmRow {
    fields: Vec<(String, f64)>,
    file_id: u32,
}

impl KpmRow {
    pub fn new(fields: Vec<(String, f64)>, file_id: u32) -> Self {
        Self { fields, file_id }
    }

    /// Measurement fields in the order the log file declares them.
    pub fn fields(&self) -> &[(String, f64)] {
        &self.fields
    }

    /// Numeric identifier from the file name (`3` for `cu-up-cell-3.txt`).
    pub fn file_id(&self) -> u32 {
        self.file_id
    }
}
