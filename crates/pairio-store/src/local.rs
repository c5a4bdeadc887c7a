use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use pairio_crypto::CanonicalHasher;
use pairio_types::Digest;
use tracing::{debug, warn};

use crate::error::{StoreError, StoreResult};
use crate::lock::{EntryLock, LockMode};

/// Sharded filesystem key/value store rooted at a directory.
///
/// The store holds no state beyond its root, so constructing one per call is
/// cheap and any number of stores (or processes) may share a root.
#[derive(Clone, Debug)]
pub struct LocalStore {
    root: PathBuf,
}

impl LocalStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Path of the entry file for a digest.
    pub fn entry_path(&self, digest: &Digest) -> PathBuf {
        self.shard_dir(digest).join(digest.as_str())
    }

    fn shard_dir(&self, digest: &Digest) -> PathBuf {
        let (outer, inner) = digest.shards();
        self.root.join(outer).join(inner)
    }

    /// Store `value` under `(collection, key)`, or remove the entry when
    /// `value` is `None`. Removing an absent entry is not an error.
    pub fn put(&self, collection: &str, key: &str, value: Option<&str>) -> StoreResult<bool> {
        let digest = CanonicalHasher::local_digest(collection, key);
        let dir = self.shard_dir(&digest);
        ensure_dir(&dir)?;

        let path = dir.join(digest.as_str());
        let _lock = EntryLock::acquire(&path, LockMode::Exclusive)?;
        match value {
            Some(value) => {
                fs::write(&path, value).map_err(|source| StoreError::Write {
                    path: path.clone(),
                    source,
                })?;
                debug!(collection, %digest, len = value.len(), "local entry written");
            }
            None => match fs::remove_file(&path) {
                Ok(()) => debug!(collection, %digest, "local entry removed"),
                Err(e) if e.kind() == ErrorKind::NotFound => {}
                Err(source) => return Err(StoreError::Write { path, source }),
            },
        }
        Ok(true)
    }

    /// Read the value under `(collection, key)`, `None` if unset.
    pub fn get(&self, collection: &str, key: &str) -> StoreResult<Option<String>> {
        let digest = CanonicalHasher::local_digest(collection, key);
        let path = self.entry_path(&digest);
        if !path.exists() {
            return Ok(None);
        }

        let _lock = EntryLock::acquire(&path, LockMode::Shared)?;
        match fs::read_to_string(&path) {
            Ok(value) => {
                debug!(collection, %digest, "local entry read");
                Ok(Some(value))
            }
            // Removed between the existence check and the lock.
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            // Not UTF-8: written by something other than a Pairio client.
            Err(e) if e.kind() == ErrorKind::InvalidData => {
                warn!(
                    collection,
                    %digest,
                    error = %e,
                    "unreadable local entry; treating as unset"
                );
                Ok(None)
            }
            Err(source) => Err(StoreError::Read { path, source }),
        }
    }

    /// Whether `(collection, key)` currently has an entry.
    pub fn contains(&self, collection: &str, key: &str) -> bool {
        let digest = CanonicalHasher::local_digest(collection, key);
        self.entry_path(&digest).exists()
    }
}

/// Create `dir` and its parents. Losing a creation race is fine as long as
/// the directory exists afterwards.
fn ensure_dir(dir: &Path) -> StoreResult<()> {
    if dir.is_dir() {
        return Ok(());
    }
    match fs::create_dir_all(dir) {
        Ok(()) => Ok(()),
        Err(_) if dir.is_dir() => Ok(()),
        Err(source) => Err(StoreError::CreateDir {
            path: dir.to_path_buf(),
            source,
        }),
    }
}
