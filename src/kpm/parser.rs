//! CSV row parsing for simulator measurement logs.

use csv::StringRecord;

use super::{KpmRow, RowParseError, SUBSCRIBER_COLUMN, TIMESTAMP_COLUMN};

/// Positions of the identity columns within a log file's header row.
///
/// Located once per file so that per-row parsing is index-based.
#[derive(Debug, Clone, Copy)]
pub struct RequiredColumns {
    timestamp: usize,
    subscriber: usize,
}

impl RequiredColumns {
    /// Locates the `timestamp` and `ueImsiComplete` columns in the header.
    ///
    /// # Errors
    ///
    /// Returns [`RowParseError::MissingColumn`] naming the first identity
    /// column the header lacks.
    pub fn locate(headers: &StringRecord) -> Result<Self, RowParseError> {
        let position = |column: &'static str| {
            headers
                .iter()
                .position(|header| header == column)
                .ok_or(RowParseError::MissingColumn { column })
        };

        Ok(Self {
            timestamp: position(TIMESTAMP_COLUMN)?,
            subscriber: position(SUBSCRIBER_COLUMN)?,
        })
    }

    /// Parses the identity fields of one data row into
    /// `(timestamp, subscriber)`.
    ///
    /// # Errors
    ///
    /// Returns [`RowParseError::InvalidKeyValue`] if either cell is absent
    /// or does not parse as an integer; the row carries no usable identity
    /// and must be skipped.
    pub fn parse(&self, record: &StringRecord) -> Result<(u64, u64), RowParseError> {
        let parse = |index: usize, column: &'static str| {
            let raw = record.get(index).unwrap_or("").trim();
            raw.parse::<u64>()
                .map_err(|source| RowParseError::InvalidKeyValue {
                    column,
                    value: raw.to_owned(),
                    source,
                })
        };

        Ok((
            parse(self.timestamp, TIMESTAMP_COLUMN)?,
            parse(self.subscriber, SUBSCRIBER_COLUMN)?,
        ))
    }
}

/// Parses one data row into a [`KpmRow`].
///
/// Cells are paired with headers positionally and kept in header order.
/// Empty cells are omitted entirely: an absent reading must not be forwarded
/// as a zero. Every non-empty cell must parse as a floating-point number.
///
/// # Errors
///
/// Returns [`RowParseError::InvalidMeasurement`] on the first cell that is
/// non-empty but not numeric; the whole row is then discarded by the caller.
pub fn parse_row(
    headers: &StringRecord,
    record: &StringRecord,
    file_id: u32,
) -> Result<KpmRow, RowParseError> {
    let mut fields = Vec::with_capacity(headers.len());
    for (field, raw) in headers.iter().zip(record.iter()) {
        let raw = raw.trim();
        if raw.is_empty() {
            continue;
        }
        let value = raw
            .parse::<f64>()
            .map_err(|source| RowParseError::InvalidMeasurement {
                field: field.to_owned(),
                value: raw.to_owned(),
                source,
            })?;
        fields.push((field.to_owned(), value));
    }

    Ok(KpmRow::new(fields, file_id))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(cells: &[&str]) -> StringRecord {
        StringRecord::from(cells.to_vec())
    }

    #[test]
    fn locates_required_columns() {
        let headers = record(&["timestamp", "ueImsiComplete", "RRU.PrbUsedDl"]);
        let required = RequiredColumns::locate(&headers).unwrap();
        let row = record(&["100", "555", "42"]);
        assert_eq!(required.parse(&row).unwrap(), (100, 555));
    }

    #[test]
    fn locates_columns_regardless_of_position() {
        let headers = record(&["RRU.PrbUsedDl", "ueImsiComplete", "timestamp"]);
        let required = RequiredColumns::locate(&headers).unwrap();
        let row = record(&["42", "555", "100"]);
        assert_eq!(required.parse(&row).unwrap(), (100, 555));
    }

    #[test]
    fn missing_column_is_reported_by_name() {
        let headers = record(&["timestamp", "RRU.PrbUsedDl"]);
        let err = RequiredColumns::locate(&headers).unwrap_err();
        match err {
            RowParseError::MissingColumn { column } => assert_eq!(column, "ueImsiComplete"),
            other => panic!("expected MissingColumn, got {other:?}"),
        }
    }

    #[test]
    fn non_integer_identity_fails_the_row() {
        let headers = record(&["timestamp", "ueImsiComplete"]);
        let required = RequiredColumns::locate(&headers).unwrap();
        let row = record(&["100.5", "555"]);
        let err = required.parse(&row).unwrap_err();
        match err {
            RowParseError::InvalidKeyValue { column, value, .. } => {
                assert_eq!(column, "timestamp");
                assert_eq!(value, "100.5");
            }
            other => panic!("expected InvalidKeyValue, got {other:?}"),
        }
    }

    #[test]
    fn truncated_row_fails_identity_parsing() {
        let headers = record(&["timestamp", "ueImsiComplete"]);
        let required = RequiredColumns::locate(&headers).unwrap();
        let row = record(&["100"]);
        assert!(required.parse(&row).is_err());
    }

    #[test]
    fn parses_fields_in_header_order() {
        let headers = record(&["timestamp", "ueImsiComplete", "a", "b"]);
        let row = record(&["100", "555", "1.5", "2"]);
        let parsed = parse_row(&headers, &row, 3).unwrap();
        assert_eq!(
            parsed.fields(),
            &[
                ("timestamp".to_owned(), 100.0),
                ("ueImsiComplete".to_owned(), 555.0),
                ("a".to_owned(), 1.5),
                ("b".to_owned(), 2.0),
            ]
        );
        assert_eq!(parsed.file_id(), 3);
    }

    #[test]
    fn empty_cells_are_dropped() {
        let headers = record(&["timestamp", "ueImsiComplete", "a", "b"]);
        let row = record(&["100", "555", "", "2"]);
        let parsed = parse_row(&headers, &row, 1).unwrap();
        let names: Vec<&str> = parsed.fields().iter().map(|(name, _)| name.as_str()).collect();
        assert_eq!(names, ["timestamp", "ueImsiComplete", "b"]);
    }

    #[test]
    fn non_numeric_measurement_fails_the_row() {
        let headers = record(&["timestamp", "ueImsiComplete", "a"]);
        let row = record(&["100", "555", "broken"]);
        let err = parse_row(&headers, &row, 1).unwrap_err();
        match err {
            RowParseError::InvalidMeasurement { field, value, .. } => {
                assert_eq!(field, "a");
                assert_eq!(value, "broken");
            }
            other => panic!("expected InvalidMeasurement, got {other:?}"),
        }
    }

    #[test]
    fn short_row_keeps_the_cells_it_has() {
        let headers = record(&["timestamp", "ueImsiComplete", "a", "b"]);
        let row = record(&["100", "555", "7"]);
        let parsed = parse_row(&headers, &row, 1).unwrap();
        let names: Vec<&str> = parsed.fields().iter().map(|(name, _)| name.as_str()).collect();
        assert_eq!(names, ["timestamp", "ueImsiComplete", "a"]);
    }
}
