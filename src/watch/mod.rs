//! Directory watching for simulator log files.
//!
//! Thin adapter over OS-level file system notification (inotify on Linux,
//! FSEvents on macOS): watches a single directory non-recursively and
//! forwards create/modify events as path notifications on a channel.
//! Debouncing and event coalescing are left to the backend; duplicate
//! notifications for the same content are harmless because ingestion is
//! idempotent.

use std::path::{Path, PathBuf};

use notify::{Config, Event, EventKind, RecommendedWatcher, RecursiveMode, Watcher};
use tokio::sync::mpsc;

/// A change observed under the watched directory, or a watcher failure.
#[derive(Debug)]
pub enum WatchEvent {
    /// A file was created or written to.
    Changed(PathBuf),
    /// The backend failed; the directory can no longer be observed.
    Failed(notify::Error),
}

/// Errors establishing the directory watch.
#[derive(Debug, thiserror::Error)]
pub enum WatchError {
    #[error("failed to initialize file watcher: {0}")]
    Init(#[source] notify::Error),

    #[error("failed to watch directory `{path}`: {source}")]
    Watch {
        path: PathBuf,
        #[source]
        source: notify::Error,
    },
}

/// Starts watching `dir` (non-recursively) and forwards events to `tx`.
///
/// Access events are dropped at the source; everything else that names a
/// path is delivered, leaving classification to the ingestion side. The
/// returned watcher must be kept alive for the duration of the watch;
/// dropping it stops event delivery.
///
/// # Errors
///
/// Returns an error if the watcher backend cannot be initialized or `dir`
/// cannot be watched (e.g., it does not exist).
pub fn watch_directory(
    dir: impl AsRef<Path>,
    tx: mpsc::UnboundedSender<WatchEvent>,
) -> Result<RecommendedWatcher, WatchError> {
    let mut watcher = RecommendedWatcher::new(
        move |result: Result<Event, notify::Error>| match result {
            Ok(event) => {
                if !matches!(event.kind, EventKind::Create(_) | EventKind::Modify(_)) {
                    return;
                }
                for path in event.paths {
                    // Send failure means the ingest side shut down first;
                    // nothing left to notify.
                    let _ = tx.send(WatchEvent::Changed(path));
                }
            }
            Err(err) => {
                let _ = tx.send(WatchEvent::Failed(err));
            }
        },
        Config::default(),
    )
    .map_err(WatchError::Init)?;

    let dir = dir.as_ref();
    watcher
        .watch(dir, RecursiveMode::NonRecursive)
        .map_err(|source| WatchError::Watch {
            path: dir.to_path_buf(),
            source,
        })?;

    Ok(watcher)
}
