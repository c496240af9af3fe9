use std::path::PathBuf;
use std::sync::Arc;

/// KPM Forwarder: watches a directory of RAN simulator CSV logs, parses the
/// key performance measurements they accumulate, and forwards newly observed
/// readings as StatsD gauges to a Telegraf collector.
///
/// This library provides the pipeline pieces (path classification, row
/// parsing, deduplication, metric mapping) and the adapters tying them to
/// the file system watcher and the collector transport.
pub mod classify;
pub mod dedup;
pub mod ingest;
pub mod kpm;
pub mod metrics;
pub mod watch;

use ingest::{Ingestor, RowBatch};
use metrics::{GaugeSink, StatsdSink};
use watch::WatchEvent;

/// Runs the forwarder until interrupted.
///
/// Configuration comes from the environment:
///
/// - `WATCH_DIR`: directory holding the simulator logs, watched
///   non-recursively (default `.`).
/// - `TELEGRAF_ADDR`: the collector's StatsD endpoint
///   (default `127.0.0.1:8125`).
///
/// File-change notifications are serialized through the ingestor, which
/// re-scans the changed file and emits gauges only for rows it has not
/// forwarded before. Batches are handed to the sink task outside the scan
/// lock, one submission per row. The loop ends cleanly on ctrl-c.
///
/// # Errors
///
/// Possible errors include:
/// - The collector address cannot be resolved or no local socket can be
///   bound.
/// - The watch directory cannot be observed, at startup or later (e.g., it
///   was deleted); this is the only condition fatal to a running process.
pub async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let watch_dir = std::env::var_os("WATCH_DIR")
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("."));
    let telegraf_addr =
        std::env::var("TELEGRAF_ADDR").unwrap_or_else(|_| String::from("127.0.0.1:8125"));

    let sink = StatsdSink::connect(&telegraf_addr).await?;
    log::debug!("forwarding gauges to {telegraf_addr}");

    let (batch_tx, mut batch_rx) = tokio::sync::mpsc::channel::<Vec<RowBatch>>(10);
    tokio::spawn(async move {
        while let Some(batches) = batch_rx.recv().await {
            for batch in batches {
                if let Err(err) = sink.send_gauges(&batch).await {
                    log::error!("failed to forward gauges: {}", err);
                }
            }
        }
    });

    let (event_tx, mut event_rx) = tokio::sync::mpsc::unbounded_channel();
    let _watcher = watch::watch_directory(&watch_dir, event_tx)?;
    log::info!("watching `{}` for simulator logs", watch_dir.display());

    let ingestor = Arc::new(Ingestor::new());
    loop {
        tokio::select! {
            _ = tokio::signal::ctrl_c() => {
                log::info!("interrupted; stopping watch");
                break;
            }
            event = event_rx.recv() => {
                match event {
                    Some(WatchEvent::Changed(path)) => {
                        log::debug!("log file `{}` changed", path.display());
                        let ingestor = Arc::clone(&ingestor);
                        let scanned = tokio::task::spawn_blocking(move || {
                            ingestor.process_file(&path)
                        })
                        .await
                        .expect("spawn_blocking panicked");

                        match scanned {
                            Ok(batches) if batches.is_empty() => {}
                            Ok(batches) => batch_tx
                                .send(batches)
                                .await
                                .expect("sink task to still exist"),
                            Err(err) => log::error!("abandoning change notification: {}", err),
                        }
                    }
                    Some(WatchEvent::Failed(err)) => {
                        return Err(format!(
                            "watch directory `{}` is no longer observable: {err}",
                            watch_dir.display()
                        )
                        .into());
                    }
                    None => break,
                }
            }
        }
    }

    Ok(())
}
