//! Foundation types for Pairio.
//!
//! Pairio is a small key/value client with a uniform `get`/`set` API over a
//! sharded local filesystem cache and a remote HTTP key/value service. This
//! crate holds the vocabulary every other Pairio crate shares.
//!
//! # Key Types
//!
//! - [`Key`] — opaque text or structured JSON object used to address a value
//! - [`Digest`] — 40-character hex SHA-1 used as a storage address
//! - [`ReadStrategy`] / [`WriteStrategy`] — which backends serve a call
//! - [`PairioConfig`] — immutable configuration snapshot
//! - [`ConfigOverrides`] — call-scoped overlay merged onto a snapshot

pub mod config;
pub mod digest;
pub mod error;
pub mod key;
pub mod strategy;

pub use config::{ConfigOverrides, PairioConfig};
pub use digest::Digest;
pub use error::TypeError;
pub use key::Key;
pub use strategy::{ReadStrategy, WriteStrategy};

/// Maximum length, in characters, of a stored value.
pub const MAX_VALUE_LENGTH: usize = 80;

/// Maximum length, in characters, of the string a key is stored under.
pub const MAX_KEY_LENGTH: usize = 80;

/// Collection used when none is configured.
pub const DEFAULT_COLLECTION: &str = "default";
