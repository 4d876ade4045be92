//! File watcher for regenerating shaders when a scene script changes

use notify::RecursiveMode;
use notify_debouncer_mini::{DebouncedEvent, Debouncer, new_debouncer};
use parking_lot::Mutex;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::sync::mpsc::{Receiver, channel};
use std::time::Duration;

use crate::{Result, ScriptError};

/// Debounce used when none is given
pub const DEFAULT_DEBOUNCE_MS: u64 = 100;

/// Event emitted when a watched file changes
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WatchEvent {
    /// A watched file was modified
    Modified(PathBuf),
    /// An error occurred while watching
    Error(String),
}

/// Watches scene scripts for changes
pub struct ScriptWatcher {
    debouncer: Debouncer<notify::RecommendedWatcher>,
    receiver: Receiver<WatchEvent>,
    watched_paths: Arc<Mutex<Vec<PathBuf>>>,
}

impl ScriptWatcher {
    /// Create a watcher; `debounce_ms` defaults to [`DEFAULT_DEBOUNCE_MS`]
    pub fn new(debounce_ms: Option<u64>) -> Result<Self> {
        let (tx, rx) = channel();
        let watched_paths = Arc::new(Mutex::new(Vec::<PathBuf>::new()));
        let watched = Arc::clone(&watched_paths);

        let debounce = Duration::from_millis(debounce_ms.unwrap_or(DEFAULT_DEBOUNCE_MS));
        let debouncer = new_debouncer(
            debounce,
            move |result: std::result::Result<Vec<DebouncedEvent>, notify::Error>| match result {
                Ok(events) => {
                    let watched = watched.lock();
                    for event in events {
                        if watched.contains(&event.path) {
                            let _ = tx.send(WatchEvent::Modified(event.path));
                        }
                    }
                }
                Err(e) => {
                    let _ = tx.send(WatchEvent::Error(format!("{e:?}")));
                }
            },
        )
        .map_err(|e| ScriptError::Watch(format!("Failed to create file watcher: {e:?}")))?;

        Ok(Self {
            debouncer,
            receiver: rx,
            watched_paths,
        })
    }

    /// Start watching a script file
    pub fn watch(&mut self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let canonical = path
            .canonicalize()
            .map_err(|e| ScriptError::Watch(format!("{}: {e}", path.display())))?;

        {
            let mut watched = self.watched_paths.lock();
            if !watched.contains(&canonical) {
                watched.push(canonical.clone());
            }
        }

        // Editors often replace the file, so watch its directory
        let dir = canonical.parent().unwrap_or(&canonical);
        self.debouncer
            .watcher()
            .watch(dir, RecursiveMode::NonRecursive)
            .map_err(|e| ScriptError::Watch(format!("{}: {e}", canonical.display())))?;

        tracing::info!("Watching: {}", canonical.display());
        Ok(())
    }

    /// Try to receive a watch event (non-blocking)
    pub fn try_recv(&self) -> Option<WatchEvent> {
        self.receiver.try_recv().ok()
    }

    /// Receive a watch event (blocking)
    pub fn recv(&self) -> Option<WatchEvent> {
        self.receiver.recv().ok()
    }

    /// Receive a watch event with timeout
    pub fn recv_timeout(&self, timeout: Duration) -> Option<WatchEvent> {
        self.receiver.recv_timeout(timeout).ok()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_watcher_creation() {
        assert!(ScriptWatcher::new(None).is_ok());
    }

    #[test]
    fn test_watch_nonexistent() {
        let mut watcher = ScriptWatcher::new(Some(50)).unwrap();
        assert!(watcher.watch("/nonexistent/path/scene.rhai").is_err());
        assert!(watcher.try_recv().is_none());
    }
}
