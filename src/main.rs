/// Entry point for the KPM forwarder.
///
/// This binary watches a directory of RAN simulator log files, parses newly
/// appended measurement rows, and forwards them as StatsD gauges to a
/// Telegraf collector.
///
/// # Errors
///
/// Returns an error if initialization fails (e.g., the collector address is
/// unusable or the watch directory cannot be observed).
///
/// # Examples
///
/// ```bash
/// WATCH_DIR=/var/lib/sim TELEGRAF_ADDR=127.0.0.1:8125 cargo run
/// ```
#[tokio::main]
async fn main() -> std::result::Result<(), Box<dyn std::error::Error>> {
    env_logger::init();
    kpm_forwarder::run().await
}
