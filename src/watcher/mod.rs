//! Live reload for the displayed file.
//!
//! Editors often save through a temp file and a rename, which replaces the
//! file under a direct watch. The parent directory is watched instead and
//! events are matched against the file name. One [`FileWatcher`] follows
//! whichever file is on screen via [`FileWatcher::retarget`].

use std::path::{Path, PathBuf};
use std::sync::mpsc::{self, Receiver};
use std::time::{Duration, Instant};

use notify::{Event, RecommendedWatcher, RecursiveMode, Watcher};

/// The followed file and the directory watched on its behalf.
#[derive(Debug, Clone, PartialEq, Eq)]
struct Target {
    /// Path as the caller gave it, compared on every retarget.
    requested: PathBuf,
    /// Canonical path; OS event paths are canonical.
    file: PathBuf,
    dir: PathBuf,
}

impl Target {
    fn resolve(path: &Path) -> Self {
        let file = path.canonicalize().unwrap_or_else(|_| path.to_path_buf());
        let dir = file
            .parent()
            .filter(|dir| !dir.as_os_str().is_empty())
            .map_or_else(|| PathBuf::from("."), Path::to_path_buf);
        Self {
            requested: path.to_path_buf(),
            file,
            dir,
        }
    }

    fn is_touched_by(&self, event: &Event) -> bool {
        let name = self.file.file_name();
        event.paths.iter().any(|path| {
            *path == self.dir || *path == self.file || (name.is_some() && path.file_name() == name)
        })
    }
}

/// Reports a change once events have been quiet for `quiet`.
#[derive(Debug)]
struct Debounce {
    quiet: Duration,
    last_event: Option<Instant>,
}

impl Debounce {
    const fn new(quiet: Duration) -> Self {
        Self {
            quiet,
            last_event: None,
        }
    }

    fn record(&mut self, at: Instant) {
        self.last_event = Some(at);
    }

    fn settled(&mut self, now: Instant) -> bool {
        match self.last_event {
            Some(at) if now.saturating_duration_since(at) >= self.quiet => {
                self.last_event = None;
                true
            }
            _ => false,
        }
    }

    fn reset(&mut self) {
        self.last_event = None;
    }
}

/// Debounced change notifications for the displayed file.
pub struct FileWatcher {
    watcher: RecommendedWatcher,
    events: Receiver<notify::Result<Event>>,
    target: Option<Target>,
    debounce: Debounce,
}

impl FileWatcher {
    /// Create a watcher that follows no file yet.
    ///
    /// # Errors
    /// Returns an error if the platform watcher cannot be created.
    pub fn new(debounce: Duration) -> notify::Result<Self> {
        let (tx, events) = mpsc::channel();
        let watcher = notify::recommended_watcher(move |res| {
            // The receiver only goes away with the watcher itself.
            let _ = tx.send(res);
        })?;
        Ok(Self {
            watcher,
            events,
            target: None,
            debounce: Debounce::new(debounce),
        })
    }

    /// Follow `path` instead of the current file; `None` stops following.
    ///
    /// Following the same path again is a no-op. The directory watch is only
    /// replaced when the new file lives somewhere else.
    ///
    /// # Errors
    /// Returns an error if the new directory cannot be watched. The path is
    /// still recorded, so the failure is not retried on every call.
    pub fn retarget(&mut self, path: Option<&Path>) -> notify::Result<()> {
        if self.target.as_ref().map(|target| target.requested.as_path()) == path {
            return Ok(());
        }
        let next = path.map(Target::resolve);
        let old_dir = self.target.take().map(|target| target.dir);
        let new_dir = next.as_ref().map(|target| target.dir.clone());

        // Anything queued so far concerns the old file.
        while self.events.try_recv().is_ok() {}
        self.debounce.reset();
        self.target = next;

        if old_dir == new_dir {
            return Ok(());
        }
        if let Some(dir) = &old_dir {
            if let Err(err) = self.watcher.unwatch(dir) {
                tracing::debug!(dir = %dir.display(), %err, "unwatch failed");
            }
        }
        if let Some(dir) = &new_dir {
            self.watcher.watch(dir, RecursiveMode::NonRecursive)?;
            tracing::info!(dir = %dir.display(), "watching directory");
        }
        Ok(())
    }

    /// The canonical path of the followed file.
    pub fn target(&self) -> Option<&Path> {
        self.target.as_ref().map(|target| target.file.as_path())
    }

    /// Drain pending events; true once a change has settled.
    pub fn take_change_ready(&mut self) -> bool {
        let now = Instant::now();
        while let Ok(event) = self.events.try_recv() {
            match event {
                Ok(event) if self.target.as_ref().is_some_and(|t| t.is_touched_by(&event)) => {
                    self.debounce.record(now);
                }
                Ok(event) => {
                    tracing::trace!(kind = ?event.kind, paths = ?event.paths, "ignoring watch event");
                }
                Err(err) => tracing::warn!(%err, "watch error"),
            }
        }
        let ready = self.debounce.settled(now);
        if ready {
            tracing::debug!(path = ?self.target(), "file changed");
        }
        ready
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use notify::EventKind;
    use tempfile::tempdir;

    fn event_for(path: PathBuf) -> Event {
        Event {
            kind: EventKind::Any,
            paths: vec![path],
            attrs: notify::event::EventAttributes::new(),
        }
    }

    fn wait_for_change(watcher: &mut FileWatcher) -> bool {
        let deadline = Instant::now() + Duration::from_secs(5);
        while Instant::now() < deadline {
            if watcher.take_change_ready() {
                return true;
            }
            std::thread::sleep(Duration::from_millis(50));
        }
        false
    }

    #[test]
    fn test_target_matches_directory_file_and_rename() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("notes.md");
        std::fs::write(&path, "# notes").unwrap();
        let target = Target::resolve(&path);

        assert!(target.is_touched_by(&event_for(target.dir.clone())));
        assert!(target.is_touched_by(&event_for(target.file.clone())));
        // Some backends report the rename target through a different prefix.
        assert!(target.is_touched_by(&event_for(PathBuf::from("/private/notes.md"))));
        assert!(!target.is_touched_by(&event_for(target.dir.join("other.md"))));
    }

    #[test]
    fn test_bare_file_name_watches_current_directory() {
        let target = Target::resolve(Path::new("does-not-exist.md"));
        assert_eq!(target.dir, PathBuf::from("."));
    }

    #[test]
    fn test_debounce_waits_for_quiet_period() {
        let start = Instant::now();
        let mut debounce = Debounce::new(Duration::from_millis(200));
        assert!(!debounce.settled(start));

        debounce.record(start);
        assert!(!debounce.settled(start + Duration::from_millis(100)));
        debounce.record(start + Duration::from_millis(150));
        assert!(!debounce.settled(start + Duration::from_millis(300)));
        assert!(debounce.settled(start + Duration::from_millis(350)));
        assert!(!debounce.settled(start + Duration::from_millis(400)), "reported once");
    }

    #[test]
    fn test_retarget_same_path_is_noop() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("a.md");
        std::fs::write(&path, "a").unwrap();

        let mut watcher = FileWatcher::new(Duration::from_millis(10)).unwrap();
        assert_eq!(watcher.target(), None);
        watcher.retarget(Some(&path)).unwrap();
        let first = watcher.target().map(Path::to_path_buf);
        watcher.retarget(Some(&path)).unwrap();
        assert_eq!(watcher.target().map(Path::to_path_buf), first);

        watcher.retarget(None).unwrap();
        assert_eq!(watcher.target(), None);
    }

    #[test]
    fn test_retarget_follows_file_in_other_directory() {
        let first = tempdir().unwrap();
        let second = tempdir().unwrap();
        let old_path = first.path().canonicalize().unwrap().join("old.md");
        let new_path = second.path().canonicalize().unwrap().join("new.md");
        std::fs::write(&old_path, "# old").unwrap();
        std::fs::write(&new_path, "# new").unwrap();

        let mut watcher = FileWatcher::new(Duration::from_millis(50)).unwrap();
        watcher.retarget(Some(&old_path)).unwrap();
        watcher.retarget(Some(&new_path)).unwrap();
        assert_eq!(watcher.target(), Some(new_path.as_path()));

        // Give the backend time to register the watch
        std::thread::sleep(Duration::from_millis(500));
        std::fs::write(&old_path, "# old again").unwrap();
        std::thread::sleep(Duration::from_millis(300));
        watcher.take_change_ready();
        std::thread::sleep(Duration::from_millis(100));
        assert!(!watcher.take_change_ready(), "old file is no longer followed");

        std::fs::write(&new_path, "# new again").unwrap();
        assert!(wait_for_change(&mut watcher), "change should be reported within 5 seconds");
    }
}
