//! Structured error types for KPM row parsing.
//!
//! [`RowParseError`] distinguishes the conditions the ingestion loop reacts
//! to differently: a header missing an identity column fails the whole file,
//! while an unparseable value only fails the row it appears in.

use std::num::{ParseFloatError, ParseIntError};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum RowParseError {
    #[error("missing required column '{column}'")]
    MissingColumn { column: &'static str },

    #[error("invalid value for '{column}': '{value}': {source}")]
    InvalidKeyValue {
        column: &'static str,
        value: String,
        #[source]
        source: ParseIntError,
    },

    #[error("invalid measurement for '{field}': '{value}': {source}")]
    InvalidMeasurement {
        field: String,
        value: String,
        #[source]
        source: ParseFloatError,
    },
}
