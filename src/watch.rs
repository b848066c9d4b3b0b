//! Watch mode: re-check the inputs whenever a data file changes.

use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result};
use notify::{
    Config as WatcherConfig, Event, EventKind, RecommendedWatcher, RecursiveMode, Watcher,
};
use tokio::sync::mpsc;

use crate::check::check_paths;
use crate::config::Config;
use crate::report::Report;
use crate::source::has_extension;

/// Quiet period after a change before re-checking
const DEBOUNCE: Duration = Duration::from_millis(300);

/// Events from the file watcher
#[derive(Debug)]
enum WatcherEvent {
    DataFileChanged(PathBuf),
    WatcherError(notify::Error),
}

/// Which changed paths belong to the inputs.
///
/// Explicit files are watched through their parent directory, since editors
/// that save by renaming replace the file the watch was attached to.
#[derive(Debug, Clone, Default, PartialEq)]
struct WatchScope {
    dirs: Vec<PathBuf>,
    files: Vec<PathBuf>,
    extensions: Vec<String>,
}

impl WatchScope {
    fn new(paths: &[PathBuf], extensions: &[String]) -> Self {
        let mut scope = WatchScope {
            extensions: extensions.to_vec(),
            ..WatchScope::default()
        };
        for path in paths {
            let path = absolute(path);
            if path.is_dir() {
                scope.dirs.push(path);
            } else {
                scope.files.push(path);
            }
        }
        scope
    }

    /// Directories to register with the watcher, and how
    fn targets(&self) -> Vec<(PathBuf, RecursiveMode)> {
        let mut targets: Vec<(PathBuf, RecursiveMode)> = self
            .dirs
            .iter()
            .map(|dir| (dir.clone(), RecursiveMode::Recursive))
            .collect();

        for file in &self.files {
            let Some(parent) = file.parent() else {
                continue;
            };
            if self.dirs.iter().any(|dir| parent.starts_with(dir)) {
                continue;
            }
            if !targets.iter().any(|(dir, _)| dir == parent) {
                targets.push((parent.to_path_buf(), RecursiveMode::NonRecursive));
            }
        }
        targets
    }

    fn matches(&self, path: &Path) -> bool {
        self.files.iter().any(|file| file == path)
            || (has_extension(path, &self.extensions)
                && self.dirs.iter().any(|dir| path.starts_with(dir)))
    }
}

/// Canonical form when the path exists, so it compares equal to event paths
fn absolute(path: &Path) -> PathBuf {
    if let Ok(canonical) = path.canonicalize() {
        return canonical;
    }
    let Some(name) = path.file_name() else {
        return path.to_path_buf();
    };
    match path.parent().map(|p| if p.as_os_str().is_empty() { Path::new(".") } else { p }) {
        Some(parent) => parent
            .canonicalize()
            .map(|dir| dir.join(name))
            .unwrap_or_else(|_| path.to_path_buf()),
        None => path.to_path_buf(),
    }
}

/// Check once, then again after every batch of changes. Runs until the
/// watcher shuts down.
pub async fn watch<F>(config: &Config, mut on_report: F) -> Result<()>
where
    F: FnMut(&Report),
{
    let options = config.check_options();
    let scope = WatchScope::new(&config.paths, &options.extensions);
    let (tx, mut rx) = mpsc::unbounded_channel();

    let event_scope = scope.clone();
    let mut watcher = RecommendedWatcher::new(
        move |res: Result<Event, notify::Error>| match res {
            Ok(event) => {
                if let EventKind::Create(_) | EventKind::Modify(_) | EventKind::Remove(_) =
                    event.kind
                {
                    for path in event.paths {
                        if event_scope.matches(&path) {
                            let _ = tx.send(WatcherEvent::DataFileChanged(path));
                        }
                    }
                }
            }
            Err(e) => {
                let _ = tx.send(WatcherEvent::WatcherError(e));
            }
        },
        WatcherConfig::default().with_poll_interval(Duration::from_secs(1)),
    )?;

    for (dir, mode) in scope.targets() {
        watcher
            .watch(&dir, mode)
            .with_context(|| format!("Failed to watch {}", dir.display()))?;
    }

    on_report(&check_paths(&config.paths, &options));
    log::info!("Watching {} path(s) for changes", config.paths.len());

    while let Some(event) = rx.recv().await {
        match event {
            WatcherEvent::DataFileChanged(path) => {
                log::info!("Data file changed: {}", path.display());

                // Editors often write a file in several steps
                tokio::time::sleep(DEBOUNCE).await;
                while let Ok(event) = rx.try_recv() {
                    if let WatcherEvent::WatcherError(e) = event {
                        log::error!("Data file watcher error: {}", e);
                    }
                }

                on_report(&check_paths(&config.paths, &options));
            }
            WatcherEvent::WatcherError(e) => {
                log::error!("Data file watcher error: {}", e);
            }
        }
    }

    Ok(())
}
