use std::fs::{File, OpenOptions};
use std::path::{Path, PathBuf};

use fs2::FileExt;
use tracing::{debug, warn};

use crate::error::{StoreError, StoreResult};

/// Lock flavor for an entry.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LockMode {
    /// Many holders at once; excludes exclusive holders.
    Shared,
    /// Single holder; excludes everyone else.
    Exclusive,
}

/// Scoped advisory lock on an entry's companion `.lock` file.
///
/// The lock is taken on construction and released when the guard is dropped,
/// so every exit path of the holder releases it. Acquisition blocks until
/// any conflicting holder releases.
pub struct EntryLock {
    file: File,
    path: PathBuf,
    mode: LockMode,
}

impl EntryLock {
    /// Lock the companion file of `entry` in the given mode.
    pub fn acquire(entry: &Path, mode: LockMode) -> StoreResult<Self> {
        let path = Self::lock_path(entry);
        let file = OpenOptions::new()
            .create(true)
            .truncate(false)
            .read(true)
            .write(true)
            .open(&path)
            .map_err(|source| StoreError::Lock {
                path: path.clone(),
                source,
            })?;

        let locked = match mode {
            LockMode::Shared => FileExt::lock_shared(&file),
            LockMode::Exclusive => FileExt::lock_exclusive(&file),
        };
        locked.map_err(|source| StoreError::Lock {
            path: path.clone(),
            source,
        })?;

        debug!(path = %path.display(), ?mode, "entry lock acquired");
        Ok(Self { file, path, mode })
    }

    /// Companion lock file path for an entry: `<entry>.lock`.
    pub fn lock_path(entry: &Path) -> PathBuf {
        let mut name = entry.as_os_str().to_owned();
        name.push(".lock");
        PathBuf::from(name)
    }

    pub fn mode(&self) -> LockMode {
        self.mode
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Drop for EntryLock {
    fn drop(&mut self) {
        if let Err(e) = FileExt::unlock(&self.file) {
            warn!(path = %self.path.display(), error = %e, "failed to release entry lock");
        }
    }
}

impl std::fmt::Debug for EntryLock {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EntryLock")
            .field("path", &self.path)
            .field("mode", &self.mode)
            .finish()
    }
}
