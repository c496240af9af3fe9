use std::path::PathBuf;

use thiserror::Error;

use crate::kpm::RowParseError;

/// Errors that abandon the processing of one change notification.
///
/// All variants are raised before any dedup state is mutated, so an
/// abandoned notification leaves the pipeline exactly as it was; the next
/// notification for the same file re-scans it from the start.
#[derive(Debug, Error)]
pub enum IngestError {
    #[error("failed to open log file `{path}`: {source}")]
    Open {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to read log file `{path}`: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    #[error("cannot process log file `{path}`: {source}")]
    Header {
        path: PathBuf,
        #[source]
        source: RowParseError,
    },
}

pub type Result<T> = std::result::Result<T, IngestError>;
