use std::fmt;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::TypeError;
use crate::strategy::{ReadStrategy, WriteStrategy};
use crate::DEFAULT_COLLECTION;

/// Environment variable consulted for the remote endpoint URL.
pub const ENV_URL: &str = "PAIRIO_URL";
/// Environment variable consulted for the remote channel.
pub const ENV_CHANNEL: &str = "PAIRIO_CHANNEL";
/// Environment variable consulted for the channel password.
pub const ENV_PASSWORD: &str = "PAIRIO_PASSWORD";
/// Environment variable seeding the default collection.
pub const ENV_COLLECTION: &str = "PAIRIO_COLLECTION";
/// Environment variable seeding the local storage root.
pub const ENV_DB_PATH: &str = "PAIRIO_DB_PATH";
/// Set to `TRUE` to log every remote request.
pub const ENV_HTTP_VERBOSE: &str = "HTTP_VERBOSE";

/// Immutable configuration snapshot.
///
/// A snapshot is never mutated in place. Call-scoped changes are expressed as
/// [`ConfigOverrides`] and merged with [`PairioConfig::apply`], which returns
/// a new snapshot.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PairioConfig {
    /// Remote endpoint base address.
    pub url: Option<String>,
    /// Logical namespace passed to remote requests.
    pub channel: Option<String>,
    /// Shared secret used for request signing. Never sent in cleartext.
    pub password: Option<String>,
    /// Default collection name.
    pub collection: String,
    /// Root directory of the local store.
    pub database_path: PathBuf,
    pub get_from: ReadStrategy,
    pub set_to: WriteStrategy,
    /// Log remote requests and their timing.
    pub verbose: bool,
}

impl Default for PairioConfig {
    fn default() -> Self {
        Self {
            url: None,
            channel: None,
            password: None,
            collection: DEFAULT_COLLECTION.to_owned(),
            database_path: default_database_path(None),
            get_from: ReadStrategy::default(),
            set_to: WriteStrategy::default(),
            verbose: false,
        }
    }
}

impl PairioConfig {
    /// Default snapshot seeded from the process environment.
    pub fn from_env() -> Self {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Default snapshot seeded from an arbitrary variable lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let set = |name: &str| lookup(name).filter(|v| !v.is_empty());
        Self {
            url: set(ENV_URL),
            channel: set(ENV_CHANNEL),
            password: set(ENV_PASSWORD),
            collection: set(ENV_COLLECTION).unwrap_or_else(|| DEFAULT_COLLECTION.to_owned()),
            database_path: set(ENV_DB_PATH)
                .map(PathBuf::from)
                .unwrap_or_else(|| default_database_path(lookup("HOME"))),
            get_from: ReadStrategy::default(),
            set_to: WriteStrategy::default(),
            verbose: lookup(ENV_HTTP_VERBOSE).as_deref() == Some("TRUE"),
        }
    }

    /// Parse a snapshot from TOML. Missing fields take their defaults.
    pub fn from_toml_str(s: &str) -> Result<Self, TypeError> {
        toml::from_str(s).map_err(|e| TypeError::ConfigParse(e.to_string()))
    }

    /// Read and parse a TOML snapshot from disk.
    pub fn from_toml_file(path: &Path) -> Result<Self, TypeError> {
        let text = std::fs::read_to_string(path).map_err(|e| TypeError::ConfigRead {
            path: path.display().to_string(),
            reason: e.to_string(),
        })?;
        Self::from_toml_str(&text)
    }

    /// Overlay `overrides` onto this snapshot, returning a new snapshot.
    pub fn apply(&self, overrides: &ConfigOverrides) -> Self {
        let mut next = self.clone();
        if let Some(url) = &overrides.url {
            next.url = Some(url.clone());
        }
        if let Some(channel) = &overrides.channel {
            next.channel = Some(channel.clone());
        }
        if let Some(password) = &overrides.password {
            next.password = Some(password.clone());
        }
        if let Some(collection) = &overrides.collection {
            next.collection = collection.clone();
        }
        if let Some(path) = &overrides.database_path {
            next.database_path = path.clone();
        }
        if let Some(get_from) = overrides.get_from {
            next.get_from = get_from;
        }
        if let Some(set_to) = overrides.set_to {
            next.set_to = set_to;
        }
        if let Some(verbose) = overrides.verbose {
            next.verbose = verbose;
        }
        next
    }
}

impl fmt::Debug for PairioConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PairioConfig")
            .field("url", &self.url)
            .field("channel", &self.channel)
            .field("password", &self.password.as_ref().map(|_| "<redacted>"))
            .field("collection", &self.collection)
            .field("database_path", &self.database_path)
            .field("get_from", &self.get_from)
            .field("set_to", &self.set_to)
            .field("verbose", &self.verbose)
            .finish()
    }
}

fn default_database_path(home: Option<String>) -> PathBuf {
    home.or_else(|| std::env::var("HOME").ok())
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("/tmp"))
        .join(".pairio")
}

/// Call-scoped configuration overlay. Unset fields leave the snapshot as is.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ConfigOverrides {
    pub url: Option<String>,
    pub channel: Option<String>,
    pub password: Option<String>,
    pub collection: Option<String>,
    pub database_path: Option<PathBuf>,
    pub get_from: Option<ReadStrategy>,
    pub set_to: Option<WriteStrategy>,
    pub verbose: Option<bool>,
}

impl ConfigOverrides {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn url(mut self, url: impl Into<String>) -> Self {
        self.url = Some(url.into());
        self
    }

    pub fn channel(mut self, channel: impl Into<String>) -> Self {
        self.channel = Some(channel.into());
        self
    }

    pub fn password(mut self, password: impl Into<String>) -> Self {
        self.password = Some(password.into());
        self
    }

    pub fn collection(mut self, collection: impl Into<String>) -> Self {
        self.collection = Some(collection.into());
        self
    }

    pub fn database_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.database_path = Some(path.into());
        self
    }

    pub fn get_from(mut self, strategy: ReadStrategy) -> Self {
        self.get_from = Some(strategy);
        self
    }

    pub fn set_to(mut self, strategy: WriteStrategy) -> Self {
        self.set_to = Some(strategy);
        self
    }

    pub fn verbose(mut self, verbose: bool) -> Self {
        self.verbose = Some(verbose);
        self
    }

    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}
