//! File watcher for watch mode.
//!
//! Recompiles when TypeScript sources under the watched directory change.

use crate::error::{CliResult, WatchError};
use notify::{RecommendedWatcher, RecursiveMode, Watcher};
use notify_debouncer_mini::{new_debouncer, DebouncedEvent, Debouncer};
use std::path::{Path, PathBuf};
use std::sync::mpsc::{channel, Receiver};
use std::time::Duration;

/// Extensions that trigger a recompile.
pub const WATCHED_EXTENSIONS: &[&str] = &["ts", "tsx"];

/// Event types for file changes.
#[derive(Debug, Clone)]
pub enum WatchEvent {
    /// A file was created or modified.
    Modified(PathBuf),
    /// A file was deleted.
    Deleted(PathBuf),
    /// An error occurred.
    Error(String),
}

/// File watcher for monitoring TypeScript source files.
pub struct FileWatcher {
    root: PathBuf,
    debounce_ms: u64,
}

impl FileWatcher {
    /// Create a new file watcher for the given directory.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            debounce_ms: 500,
        }
    }

    /// Start watching for file changes.
    ///
    /// Events arrive on the returned receiver for as long as the debouncer
    /// is kept alive.
    pub fn watch(&self) -> CliResult<(Debouncer<RecommendedWatcher>, Receiver<WatchEvent>)> {
        let (tx, rx) = channel::<WatchEvent>();

        let mut debouncer = new_debouncer(
            Duration::from_millis(self.debounce_ms),
            move |result: Result<Vec<DebouncedEvent>, notify::Error>| match result {
                Ok(events) => {
                    for event in events {
                        let path = event.path;
                        if !is_watched_source(&path) {
                            continue;
                        }

                        let watch_event = if path.exists() {
                            WatchEvent::Modified(path)
                        } else {
                            WatchEvent::Deleted(path)
                        };
                        let _ = tx.send(watch_event);
                    }
                }
                Err(e) => {
                    let _ = tx.send(WatchEvent::Error(e.to_string()));
                }
            },
        )
        .map_err(|e| WatchError::Init(e.to_string()))?;

        debouncer
            .watcher()
            .watch(&self.root, RecursiveMode::Recursive)
            .map_err(|e| WatchError::Init(e.to_string()))?;

        Ok((debouncer, rx))
    }

    /// Get the root directory being watched.
    pub fn root(&self) -> &Path {
        &self.root
    }
}

/// Whether a change to `path` should trigger a recompile.
pub fn is_watched_source(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| WATCHED_EXTENSIONS.contains(&ext))
}

impl WatchEvent {
    /// Get the path associated with this event.
    pub fn path(&self) -> Option<&Path> {
        match self {
            WatchEvent::Modified(p) | WatchEvent::Deleted(p) => Some(p),
            WatchEvent::Error(_) => None,
        }
    }

    /// The event as an error, if it is one.
    pub fn error(&self) -> Option<WatchError> {
        match self {
            WatchEvent::Error(msg) => Some(WatchError::Notify(msg.clone())),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_watch_event_path() {
        let path = PathBuf::from("/src/user.ts");

        assert_eq!(WatchEvent::Modified(path.clone()).path(), Some(path.as_path()));
        assert_eq!(WatchEvent::Deleted(path.clone()).path(), Some(path.as_path()));
        assert_eq!(WatchEvent::Error("boom".to_string()).path(), None);
    }

    #[test]
    fn test_watch_event_error() {
        assert!(WatchEvent::Modified(PathBuf::from("/a.ts")).error().is_none());

        let error = WatchEvent::Error("boom".to_string()).error().unwrap();
        assert_eq!(error.to_string(), "Watch notification error: boom");
    }

    #[test]
    fn test_watched_sources() {
        assert!(is_watched_source(Path::new("src/user.ts")));
        assert!(is_watched_source(Path::new("src/form.tsx")));
        assert!(is_watched_source(Path::new("types/user.d.ts")));
        assert!(!is_watched_source(Path::new("src/user.js")));
        assert!(!is_watched_source(Path::new(".form-schema/output/form-schema.json")));
        assert!(!is_watched_source(Path::new("Makefile")));
    }

    #[test]
    fn test_file_watcher_new() {
        let watcher = FileWatcher::new("/test/path");
        assert_eq!(watcher.root(), Path::new("/test/path"));
        assert_eq!(watcher.debounce_ms, 500);
    }
}
