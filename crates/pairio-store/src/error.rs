use std::path::PathBuf;

/// Errors from local store operations.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// A shard directory could not be created and does not exist.
    #[error("unable to create directory {path}: {source}")]
    CreateDir {
        path: PathBuf,
        source: std::io::Error,
    },

    /// The entry's lock file could not be opened or locked.
    #[error("unable to lock {path}: {source}")]
    Lock {
        path: PathBuf,
        source: std::io::Error,
    },

    /// Reading an entry failed for a reason other than absence.
    #[error("unable to read {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    /// Writing or removing an entry failed.
    #[error("unable to write {path}: {source}")]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },
}

/// Result alias for store operations.
pub type StoreResult<T> = Result<T, StoreError>;
