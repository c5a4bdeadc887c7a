//! Local filesystem storage for Pairio.
//!
//! Values live one per file under a two-level shard tree derived from the
//! digest of `{collection, key}`:
//!
//! ```text
//! <root>/<digest[0:2]>/<digest[2:4]>/<digest>        value bytes
//! <root>/<digest[0:2]>/<digest[2:4]>/<digest>.lock   coordination only
//! ```
//!
//! # Design Rules
//!
//! 1. Presence of the entry file means the key is set; absence means unset.
//! 2. Writers hold an exclusive lock on the entry's lock file, readers a
//!    shared one. Locks are advisory and only order participants that use
//!    the same convention.
//! 3. Locks are released on every exit path, including errors.
//! 4. Reads never create directories.

pub mod error;
pub mod local;
pub mod lock;

pub use error::{StoreError, StoreResult};
pub use local::LocalStore;
pub use lock::{EntryLock, LockMode};
