//! Gauge derivation and forwarding toward the metrics collector.
//!
//! Each newly seen measurement row becomes a batch of [`Gauge`] updates, one
//! per field, named according to the field's scope (cell or subscriber).
//! The [`GaugeSink`] trait is the seam to the transport; the shipped
//! implementation speaks the StatsD line protocol over UDP.

mod error;
mod mapper;
mod statsd;

pub use error::{Error, Result};
pub use mapper::map_field;
pub use statsd::StatsdSink;

/// A single point-in-time gauge update.
#[derive(Debug, Clone, PartialEq)]
pub struct Gauge {
    name: String,
    value: f64,
}

impl Gauge {
    pub fn new(name: String, value: f64) -> Self {
        Self { name, value }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn value(&self) -> f64 {
        self.value
    }
}

/// Transport seam to the metrics collector.
///
/// Name collisions across rows overwrite the prior gauge value at the
/// collector; gauges carry no tags or labels.
pub trait GaugeSink {
    /// Forwards one row's gauges as a single atomic submission.
    fn send_gauges(&self, gauges: &[Gauge]) -> impl std::future::Future<Output = Result<()>> + Send;
}
