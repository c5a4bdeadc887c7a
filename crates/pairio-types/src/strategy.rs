use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::TypeError;

/// Which backend(s) answer a read, and in what order.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReadStrategy {
    #[default]
    Local,
    Remote,
    /// Local first; the remote is consulted only on a local miss.
    LocalThenRemote,
    /// Remote first; the local store is consulted only on a remote miss.
    RemoteThenLocal,
}

impl ReadStrategy {
    pub const ALL: [Self; 4] = [
        Self::Local,
        Self::Remote,
        Self::LocalThenRemote,
        Self::RemoteThenLocal,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Local => "local",
            Self::Remote => "remote",
            Self::LocalThenRemote => "local_then_remote",
            Self::RemoteThenLocal => "remote_then_local",
        }
    }

    pub fn uses_remote(&self) -> bool {
        !matches!(self, Self::Local)
    }
}

/// Which backend(s) receive a write.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WriteStrategy {
    #[default]
    Local,
    Remote,
    /// Local, then remote. Not atomic as a pair.
    LocalAndRemote,
}

impl WriteStrategy {
    pub const ALL: [Self; 3] = [Self::Local, Self::Remote, Self::LocalAndRemote];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Local => "local",
            Self::Remote => "remote",
            Self::LocalAndRemote => "local_and_remote",
        }
    }

    pub fn uses_remote(&self) -> bool {
        !matches!(self, Self::Local)
    }
}

impl FromStr for ReadStrategy {
    type Err = TypeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|strategy| strategy.as_str() == s)
            .ok_or_else(|| TypeError::UnknownReadStrategy(s.to_owned()))
    }
}

impl FromStr for WriteStrategy {
    type Err = TypeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|strategy| strategy.as_str() == s)
            .ok_or_else(|| TypeError::UnknownWriteStrategy(s.to_owned()))
    }
}

impl fmt::Display for ReadStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Display for WriteStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
