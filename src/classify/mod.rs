//! Log file classification for the disaggregated-RAN simulator.
//!
//! The simulator writes one CSV log per network function instance, named
//! after the component and cell it belongs to (`cu-up-cell-3.txt`,
//! `du-cell-1.txt`, ...). This module maps a file path to the
//! [`SourceKind`] family it reports for, and extracts the numeric cell
//! identifier carried in the name.
//!
//! Classification is an ordered table of compiled patterns; the first match
//! wins. Only the file-name tail is inspected, so paths may carry arbitrary
//! directory prefixes.

use std::path::Path;
use std::sync::LazyLock;

use regex::Regex;

/// Network function family a simulator log file reports for.
///
/// Cell 1 hosts the aggregator ("eNB") cell, so its user-plane and
/// control-plane logs are tracked as distinct families from cells 2-5.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SourceKind {
    /// Central-unit user-plane, cells 2-5.
    CuUp,
    /// Central-unit control-plane, cells 2-5.
    CuCp,
    /// Distributed-unit, cells 1-5.
    Du,
    /// Aggregator cell user-plane.
    CuUpPrimary,
    /// Aggregator cell control-plane.
    CuCpPrimary,
}

impl SourceKind {
    /// Suffix appended to subscriber-scoped metric names for this family.
    pub fn plane_suffix(self) -> &'static str {
        match self {
            SourceKind::CuUp | SourceKind::CuUpPrimary => "_up",
            SourceKind::CuCp | SourceKind::CuCpPrimary => "_cp",
            SourceKind::Du => "_du",
        }
    }
}

/// Classification table, in priority order.
static PATTERNS: LazyLock<Vec<(Regex, SourceKind)>> = LazyLock::new(|| {
    [
        (r"^cu-up-cell-[2-5]\.txt$", SourceKind::CuUp),
        (r"^cu-cp-cell-[2-5]\.txt$", SourceKind::CuCp),
        (r"^du-cell-[1-5]\.txt$", SourceKind::Du),
        (r"^cu-up-cell-1\.txt$", SourceKind::CuUpPrimary),
        (r"^cu-cp-cell-1\.txt$", SourceKind::CuCpPrimary),
    ]
    .into_iter()
    .map(|(pattern, kind)| {
        let pattern = Regex::new(pattern).expect("classification patterns are valid");
        (pattern, kind)
    })
    .collect()
});

static FILE_ID: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"-(\d+)\.txt$").expect("file id pattern is valid"));

/// Determines which source family a log file belongs to.
///
/// Patterns are tried in a fixed priority order and the first match wins.
/// Returns `None` for paths that name no known simulator log; such files
/// carry no measurements and are ignored by the pipeline.
///
/// # Examples
///
/// ```
/// use kpm_forwarder::classify::{self, SourceKind};
///
/// assert_eq!(classify::classify("logs/du-cell-3.txt"), Some(SourceKind::Du));
/// assert_eq!(classify::classify("cu-up-cell-1.txt"), Some(SourceKind::CuUpPrimary));
/// assert_eq!(classify::classify("notes.txt"), None);
/// ```
pub fn classify(path: impl AsRef<Path>) -> Option<SourceKind> {
    let name = path.as_ref().file_name()?.to_str()?;
    PATTERNS
        .iter()
        .find(|(pattern, _)| pattern.is_match(name))
        .map(|(_, kind)| *kind)
}

/// Extracts the numeric cell/file identifier from the file name
/// (`3` from `cu-up-cell-3.txt`).
///
/// A positive [`classify`] result does not guarantee extraction succeeds;
/// callers must treat `None` as a recoverable skip for the file's rows.
pub fn file_id(path: impl AsRef<Path>) -> Option<u32> {
    let name = path.as_ref().file_name()?.to_str()?;
    FILE_ID
        .captures(name)
        .and_then(|caps| caps.get(1))
        .and_then(|digits| digits.as_str().parse().ok())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classifies_cu_up_cells_2_to_5() {
        for cell in 2..=5 {
            let name = format!("cu-up-cell-{cell}.txt");
            assert_eq!(classify(&name), Some(SourceKind::CuUp), "{name}");
        }
    }

    #[test]
    fn classifies_cu_cp_cells_2_to_5() {
        for cell in 2..=5 {
            let name = format!("cu-cp-cell-{cell}.txt");
            assert_eq!(classify(&name), Some(SourceKind::CuCp), "{name}");
        }
    }

    #[test]
    fn classifies_du_cells_1_to_5() {
        for cell in 1..=5 {
            let name = format!("du-cell-{cell}.txt");
            assert_eq!(classify(&name), Some(SourceKind::Du), "{name}");
        }
    }

    #[test]
    fn classifies_aggregator_cell_planes() {
        assert_eq!(classify("cu-up-cell-1.txt"), Some(SourceKind::CuUpPrimary));
        assert_eq!(classify("cu-cp-cell-1.txt"), Some(SourceKind::CuCpPrimary));
    }

    #[test]
    fn tolerates_directory_prefixes() {
        assert_eq!(
            classify("/var/lib/sim/run-7/cu-up-cell-4.txt"),
            Some(SourceKind::CuUp)
        );
        assert_eq!(classify("./du-cell-1.txt"), Some(SourceKind::Du));
    }

    #[test]
    fn rejects_unknown_paths() {
        assert_eq!(classify("readme.md"), None);
        assert_eq!(classify("du-cell-6.txt"), None);
        assert_eq!(classify("cu-up-cell-0.txt"), None);
        assert_eq!(classify("du-cell-12.txt"), None);
        assert_eq!(classify("xdu-cell-1.txt"), None);
        assert_eq!(classify("du-cell-1.txt.bak"), None);
    }

    #[test]
    fn matching_is_case_sensitive() {
        assert_eq!(classify("DU-CELL-1.TXT"), None);
    }

    #[test]
    fn extracts_file_id() {
        assert_eq!(file_id("cu-up-cell-3.txt"), Some(3));
        assert_eq!(file_id("/some/dir/du-cell-1.txt"), Some(1));
    }

    #[test]
    fn file_id_fails_without_digit_suffix() {
        assert_eq!(file_id("du-cell-x.txt"), None);
        assert_eq!(file_id("notes.txt"), None);
    }

    #[test]
    fn plane_suffix_per_family() {
        assert_eq!(SourceKind::CuUp.plane_suffix(), "_up");
        assert_eq!(SourceKind::CuUpPrimary.plane_suffix(), "_up");
        assert_eq!(SourceKind::CuCp.plane_suffix(), "_cp");
        assert_eq!(SourceKind::CuCpPrimary.plane_suffix(), "_cp");
        assert_eq!(SourceKind::Du.plane_suffix(), "_du");
    }
}
