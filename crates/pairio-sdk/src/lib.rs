//! Pairio client.
//!
//! [`Pairio`] offers `get`/`set` over two independent backends: a sharded
//! local filesystem store and a remote HTTP key/value service. The configured
//! [`ReadStrategy`] and [`WriteStrategy`] decide which backends take part in a
//! call and in what order. Local and remote stores are never synchronized
//! with each other.
//!
//! ```no_run
//! use pairio_sdk::{Pairio, PairioConfig};
//!
//! let pairio = Pairio::new(PairioConfig::from_env())?;
//! pairio.set("alpha", Some("hello"))?;
//! assert_eq!(pairio.get("alpha")?.as_deref(), Some("hello"));
//! # Ok::<(), pairio_sdk::SdkError>(())
//! ```

pub mod backend;
pub mod client;
pub mod error;
pub mod validation;

pub use backend::{Backend, LocalBackend};
pub use client::Pairio;
pub use error::{SdkError, SdkResult};

// Re-export key types
pub use pairio_remote::{RemoteClient, RetryPolicy};
pub use pairio_types::{
    ConfigOverrides, Digest, Key, PairioConfig, ReadStrategy, WriteStrategy, MAX_KEY_LENGTH,
    MAX_VALUE_LENGTH,
};
