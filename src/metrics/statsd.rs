//! StatsD gauge transport toward a Telegraf collector.

use std::fmt::Write;

use tokio::net::UdpSocket;

use super::{Error, Gauge, GaugeSink, Result};

/// Sends gauge batches to a StatsD listener over UDP.
///
/// Each batch becomes one datagram with newline-separated updates in the
/// StatsD line protocol (`<name>:<value>|g`), so a row's gauges arrive at
/// the collector together and in order.
pub struct StatsdSink {
    socket: UdpSocket,
}

impl StatsdSink {
    /// Binds a local socket and connects it to the collector address.
    ///
    /// # Arguments
    ///
    /// * `addr` - The collector's StatsD endpoint, e.g. `127.0.0.1:8125`.
    ///
    /// # Errors
    ///
    /// Returns an error if no local socket can be bound or the address does
    /// not resolve.
    pub async fn connect(addr: &str) -> Result<Self> {
        let socket = UdpSocket::bind("0.0.0.0:0").await.map_err(Error::Bind)?;
        socket.connect(addr).await.map_err(|source| Error::Connect {
            addr: addr.to_owned(),
            source,
        })?;
        Ok(Self { socket })
    }
}

impl GaugeSink for StatsdSink {
    /// Forwards one row's gauges as a single datagram.
    ///
    /// # Errors
    ///
    /// Returns an error if the send fails; the caller logs and drops the
    /// batch, it is not re-queued.
    async fn send_gauges(&self, gauges: &[Gauge]) -> Result<()> {
        if gauges.is_empty() {
            return Ok(());
        }

        let datagram = format_datagram(gauges);
        self.socket
            .send(datagram.as_bytes())
            .await
            .map_err(Error::Send)?;

        for gauge in gauges {
            log::trace!(target: "statsd", "sent {} = {}", gauge.name(), gauge.value());
        }
        Ok(())
    }
}

/// Formats a batch as newline-separated StatsD gauge lines.
fn format_datagram(gauges: &[Gauge]) -> String {
    let mut datagram = String::new();
    for gauge in gauges {
        if !datagram.is_empty() {
            datagram.push('\n');
        }
        let _ = write!(datagram, "{}:{}|g", gauge.name(), gauge.value());
    }
    datagram
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn formats_single_gauge() {
        let gauges = [Gauge::new("RRU.PrbUsedDl_cell_2".to_owned(), 42.0)];
        assert_eq!(format_datagram(&gauges), "RRU.PrbUsedDl_cell_2:42|g");
    }

    #[test]
    fn formats_batch_as_newline_separated_lines() {
        let gauges = [
            Gauge::new("a_cell_1".to_owned(), 1.0),
            Gauge::new("b_cell_1".to_owned(), 2.5),
        ];
        assert_eq!(format_datagram(&gauges), "a_cell_1:1|g\nb_cell_1:2.5|g");
    }

    #[test]
    fn integral_values_carry_no_fraction() {
        let gauges = [Gauge::new("x".to_owned(), 5.0)];
        assert_eq!(format_datagram(&gauges), "x:5|g");
    }

    #[tokio::test]
    async fn delivers_datagram_to_local_listener() {
        let listener = UdpSocket::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();

        let sink = StatsdSink::connect(&addr.to_string()).await.unwrap();
        let gauges = [Gauge::new("RRU.PrbUsedDl_cell_2".to_owned(), 42.0)];
        sink.send_gauges(&gauges).await.unwrap();

        let mut buf = [0u8; 1024];
        let received = tokio::time::timeout(std::time::Duration::from_secs(5), async {
            listener.recv(&mut buf).await.unwrap()
        })
        .await
        .expect("datagram should arrive");
        assert_eq!(&buf[..received], b"RRU.PrbUsedDl_cell_2:42|g");
    }

    #[tokio::test]
    async fn empty_batch_sends_nothing() {
        let listener = UdpSocket::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();

        let sink = StatsdSink::connect(&addr.to_string()).await.unwrap();
        sink.send_gauges(&[]).await.unwrap();

        let mut buf = [0u8; 16];
        let outcome = tokio::time::timeout(
            std::time::Duration::from_millis(200),
            listener.recv(&mut buf),
        )
        .await;
        assert!(outcome.is_err(), "no datagram should arrive");
    }
}
