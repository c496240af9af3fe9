//! Derivation of collector-facing gauge names and values.
//!
//! The simulator's field labels fall into two scopes:
//!
//! - **Cell-scoped** fields (no `UEID` marker) describe a whole cell and are
//!   named `<field>_cell_<file id>`.
//! - **Subscriber-scoped** fields (label contains `UEID`) describe one UE
//!   and are named `<field>_<imsi>` plus a plane suffix for the source
//!   family (`_up`, `_cp`, or `_du`).
//!
//! Whitespace never survives into a metric name. One field additionally
//! needs a unit conversion before emission.

use crate::classify::SourceKind;

use super::Gauge;

/// Field label carrying PDCP downlink latency. The simulator reports it in
/// 0.1 ms units, so the value is scaled before emission.
const PDCP_LATENCY_FIELD: &str = "DRB.PdcpSduDelayDl.UEID (pdcpLatency)";

/// Marker distinguishing subscriber-scoped field labels from cell-scoped
/// ones.
const SUBSCRIBER_MARKER: &str = "UEID";

/// Derives the gauge emitted for one measurement field.
///
/// # Examples
///
/// ```
/// use kpm_forwarder::classify::SourceKind;
/// use kpm_forwarder::metrics::map_field;
///
/// let gauge = map_field(SourceKind::CuUp, "DRB.UEThpDl.UEID", 12.0, 123456789, 3);
/// assert_eq!(gauge.name(), "DRB.UEThpDl.UEID_123456789_up");
/// assert_eq!(gauge.value(), 12.0);
/// ```
pub fn map_field(
    kind: SourceKind,
    field: &str,
    value: f64,
    subscriber: u64,
    file_id: u32,
) -> Gauge {
    let value = if field == PDCP_LATENCY_FIELD {
        value * 0.1
    } else {
        value
    };

    let name = if field.contains(SUBSCRIBER_MARKER) {
        let mut name = strip_whitespace(&format!("{field}_{subscriber}"));
        name.push_str(kind.plane_suffix());
        name
    } else {
        strip_whitespace(&format!("{field}_cell_{file_id}"))
    };

    Gauge::new(name, value)
}

fn strip_whitespace(name: &str) -> String {
    name.chars().filter(|c| !c.is_whitespace()).collect()
}
