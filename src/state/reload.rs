//! Live-reload monitor.
//!
//! Polls the backing file's modification time once per tick. The last seen
//! timestamp lives here (not in a global) and is recorded at construction, so
//! the first tick after startup never reloads an unchanged file.

use crate::source::WatchedFile;
use std::time::{Duration, SystemTime};
use tracing::debug;

/// Default interval between reload checks.
pub const DEFAULT_RELOAD_INTERVAL: Duration = Duration::from_secs(1);

/// Modification-time watcher for a single file.
pub struct ReloadMonitor {
    source: Box<dyn WatchedFile>,
    last_modified: Option<SystemTime>,
    interval: Duration,
}

impl std::fmt::Debug for ReloadMonitor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ReloadMonitor")
            .field("last_modified", &self.last_modified)
            .field("interval", &self.interval)
            .finish_non_exhaustive()
    }
}

impl ReloadMonitor {
    /// Create a monitor and record the file's current modification time.
    pub fn new(source: Box<dyn WatchedFile>, interval: Duration) -> Self {
        let last_modified = source.modified().ok();
        Self {
            source,
            last_modified,
            interval,
        }
    }

    /// Delay until the next check.
    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Last recorded modification time.
    pub fn last_modified(&self) -> Option<SystemTime> {
        self.last_modified
    }

    /// Run one reload check.
    ///
    /// Returns the new content when the modification time differs from the
    /// recorded one and the file could be read. The timestamp is only
    /// recorded after a successful read, so a failed read is retried on the
    /// next tick. Failures are logged and otherwise ignored.
    pub fn check(&mut self) -> Option<String> {
        let modified = match self.source.modified() {
            Ok(modified) => modified,
            Err(e) => {
                debug!(error = %e, "Reload check: stat failed");
                return None;
            }
        };

        if self.last_modified == Some(modified) {
            return None;
        }

        match self.source.read() {
            Ok(content) => {
                self.last_modified = Some(modified);
                Some(content)
            }
            Err(e) => {
                debug!(error = %e, "Reload check: read failed");
                None
            }
        }
    }
}
