use std::fmt;

use pairio_types::config::{ENV_CHANNEL, ENV_PASSWORD, ENV_URL};
use pairio_types::PairioConfig;

use crate::error::{RemoteError, RemoteResult};

/// Variable lookup used as the last link of the resolution chain.
pub type EnvLookup = fn(&str) -> Option<String>;

/// Reads the process environment.
pub fn process_env(name: &str) -> Option<String> {
    std::env::var(name).ok()
}

/// Fully resolved remote settings.
#[derive(Clone, PartialEq, Eq)]
pub struct RemoteSettings {
    pub url: String,
    pub channel: String,
    pub password: String,
}

impl RemoteSettings {
    /// Resolve every remote field: configuration snapshot first, then the
    /// environment. Empty values count as unset.
    pub fn resolve(config: &PairioConfig, env: EnvLookup) -> RemoteResult<Self> {
        Ok(Self {
            url: Self::resolve_url(config, env)?,
            channel: resolve_field(config.channel.as_deref(), "channel", ENV_CHANNEL, env)?,
            password: resolve_field(config.password.as_deref(), "password", ENV_PASSWORD, env)?,
        })
    }

    /// Resolve only the endpoint URL.
    pub fn resolve_url(config: &PairioConfig, env: EnvLookup) -> RemoteResult<String> {
        resolve_field(config.url.as_deref(), "url", ENV_URL, env)
    }
}

fn resolve_field(
    configured: Option<&str>,
    field: &'static str,
    env_var: &'static str,
    env: EnvLookup,
) -> RemoteResult<String> {
    if let Some(value) = configured.filter(|v| !v.is_empty()) {
        return Ok(value.to_owned());
    }
    env(env_var)
        .filter(|v| !v.is_empty())
        .ok_or(RemoteError::MissingConfig { field, env_var })
}

impl fmt::Debug for RemoteSettings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RemoteSettings")
            .field("url", &self.url)
            .field("channel", &self.channel)
            .field("password", &"<redacted>")
            .finish()
    }
}
