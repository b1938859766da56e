//! # Temp Output Registry
//!
//! Session-scoped bookkeeping of decrypted files. The registry owns the
//! session's temporary output directory and, at teardown, tries to delete every
//! registered file and then the directory itself.
//!
//! Teardown runs on [`Drop`] as well, so early returns and unwinding still
//! clean up.

use std::io;
use std::path::{Path, PathBuf};

use tempfile::TempDir;
use tracing::{debug, warn};

use crate::consts::TEMP_DIR_PREFIX;
use crate::error::MediacryptError;

/// What a [`TempOutputRegistry::teardown`] call managed to remove.
#[derive(Debug, Default)]
pub struct TeardownReport {
    /// Registered files deleted (or already gone).
    pub removed: usize,
    /// Files (or the directory) that could not be deleted.
    pub failures: Vec<(PathBuf, io::Error)>,
}

impl TeardownReport {
    #[must_use]
    pub fn is_clean(&self) -> bool {
        self.failures.is_empty()
    }
}

#[derive(Debug)]
pub struct TempOutputRegistry {
    dir: Option<TempDir>,
    entries: Vec<PathBuf>,
}

impl TempOutputRegistry {
    /// Create a fresh temporary output directory under the system temp dir.
    pub fn new() -> Result<Self, MediacryptError> {
        let dir = tempfile::Builder::new()
            .prefix(TEMP_DIR_PREFIX)
            .tempdir()?;
        Ok(Self::with_dir(dir))
    }

    /// Create the temporary output directory under `parent`.
    pub fn new_in(parent: impl AsRef<Path>) -> Result<Self, MediacryptError> {
        let dir = tempfile::Builder::new()
            .prefix(TEMP_DIR_PREFIX)
            .tempdir_in(parent)?;
        Ok(Self::with_dir(dir))
    }

    fn with_dir(dir: TempDir) -> Self {
        debug!(dir = %dir.path().display(), "session output directory created");
        Self {
            dir: Some(dir),
            entries: Vec::new(),
        }
    }

    /// Output directory, or `None` after teardown.
    #[must_use]
    pub fn dir(&self) -> Option<&Path> {
        self.dir.as_ref().map(TempDir::path)
    }

    /// Record a completed output. Call only after observing the job's
    /// `Completed` event.
    ///
    /// Returns `false` if the path was already registered; it is not added
    /// twice.
    pub fn register(&mut self, path: impl Into<PathBuf>) -> bool {
        let path = path.into();
        if self.entries.contains(&path) {
            debug!(path = %path.display(), "output already registered");
            return false;
        }
        debug!(path = %path.display(), "output registered");
        self.entries.push(path);
        true
    }

    /// Registered paths in registration order.
    #[must_use]
    pub fn entries(&self) -> &[PathBuf] {
        &self.entries
    }

    #[must_use]
    pub fn is_torn_down(&self) -> bool {
        self.dir.is_none() && self.entries.is_empty()
    }

    /// Delete every registered file, then the backing directory.
    ///
    /// A failed deletion is logged and reported but never stops the rest.
    /// Calling this again after a teardown is a no-op.
    pub fn teardown(&mut self) -> TeardownReport {
        let mut report = TeardownReport::default();

        for path in self.entries.drain(..) {
            match std::fs::remove_file(&path) {
                Ok(()) => report.removed += 1,
                Err(e) if e.kind() == io::ErrorKind::NotFound => report.removed += 1,
                Err(e) => {
                    warn!(path = %path.display(), error = %e, "failed to delete temp output");
                    report.failures.push((path, e));
                }
            }
        }

        if let Some(dir) = self.dir.take() {
            let path = dir.path().to_path_buf();
            if let Err(e) = dir.close() {
                warn!(dir = %path.display(), error = %e, "failed to remove output directory");
                report.failures.push((path, e));
            }
        }

        debug!(
            removed = report.removed,
            failures = report.failures.len(),
            "registry torn down"
        );
        report
    }
}

impl Drop for TempOutputRegistry {
    fn drop(&mut self) {
        if !self.is_torn_down() {
            self.teardown();
        }
    }
}
