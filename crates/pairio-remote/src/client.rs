use pairio_crypto::CanonicalHasher;
use pairio_types::PairioConfig;
use tracing::warn;

use crate::error::{RemoteError, RemoteResult};
use crate::protocol::{probe_url, GetResponse, RequestDescriptor, SetResponse};
use crate::settings::{process_env, EnvLookup, RemoteSettings};
use crate::transport::{fetch_json, HttpTransport, ReqwestTransport, RetryPolicy, DEFAULT_TIMEOUT};

/// Client for the remote key/value service.
///
/// `get` and `put` only fail when the remote settings cannot be resolved.
/// Network trouble, bad responses, and server-side rejections are logged
/// and reported as a miss (`None`) or an unsuccessful write (`false`).
pub struct RemoteClient<T: HttpTransport = ReqwestTransport> {
    transport: T,
    retry: RetryPolicy,
    env: EnvLookup,
}

impl RemoteClient<ReqwestTransport> {
    /// Client over a blocking `reqwest` transport with default timeout and
    /// retry schedule.
    pub fn new() -> RemoteResult<Self> {
        Ok(Self::with_transport(ReqwestTransport::new(DEFAULT_TIMEOUT)?))
    }
}

impl<T: HttpTransport> RemoteClient<T> {
    pub fn with_transport(transport: T) -> Self {
        Self {
            transport,
            retry: RetryPolicy::default(),
            env: process_env,
        }
    }

    pub fn with_retry(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }

    /// Replace the environment lookup used as the settings fallback.
    pub fn with_env(mut self, env: EnvLookup) -> Self {
        self.env = env;
        self
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    pub fn retry(&self) -> &RetryPolicy {
        &self.retry
    }

    /// Resolve remote settings for `config` through this client's fallback.
    pub fn settings(&self, config: &PairioConfig) -> RemoteResult<RemoteSettings> {
        RemoteSettings::resolve(config, self.env)
    }

    /// Fetch the value stored under `key` in `collection`.
    pub fn get(
        &self,
        collection: &str,
        key: &str,
        config: &PairioConfig,
    ) -> RemoteResult<Option<String>> {
        let settings = self.settings(config)?;
        let keyhash = CanonicalHasher::remote_digest(key);
        let url = RequestDescriptor::get(collection, &keyhash, &settings.password).url(&settings);

        let response = fetch_json::<GetResponse>(&self.transport, &url, &self.retry, config.verbose)
            .and_then(|r| accepted(r.success, r.error).map(|()| r.value));
        Ok(report(response, collection, "get").flatten())
    }

    /// Store `value` under `key` in `collection`, or delete it when `None`.
    pub fn put(
        &self,
        collection: &str,
        key: &str,
        value: Option<&str>,
        config: &PairioConfig,
    ) -> RemoteResult<bool> {
        let settings = self.settings(config)?;
        let keyhash = CanonicalHasher::remote_digest(key);
        let url = RequestDescriptor::set(collection, &keyhash, value, &settings.password)
            .url(&settings);

        let response = fetch_json::<SetResponse>(&self.transport, &url, &self.retry, config.verbose)
            .and_then(|r| accepted(r.success, r.error));
        Ok(report(response, collection, "set").is_some())
    }

    /// Ask the service whether it is up. Needs only the endpoint URL.
    pub fn probe(&self, config: &PairioConfig) -> RemoteResult<bool> {
        let url = probe_url(&RemoteSettings::resolve_url(config, self.env)?);
        let response = fetch_json::<SetResponse>(&self.transport, &url, &self.retry, config.verbose)
            .and_then(|r| accepted(r.success, r.error));
        Ok(report(response, "", "probe").is_some())
    }
}

fn accepted(success: bool, error: Option<String>) -> RemoteResult<()> {
    if success {
        Ok(())
    } else {
        Err(RemoteError::Rejected(
            error.unwrap_or_else(|| "success=false".into()),
        ))
    }
}

fn report<V>(result: RemoteResult<V>, collection: &str, action: &str) -> Option<V> {
    match result {
        Ok(v) => Some(v),
        Err(e) => {
            warn!(action, collection, error = %e, "remote request failed");
            None
        }
    }
}

impl<T: HttpTransport> std::fmt::Debug for RemoteClient<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RemoteClient")
            .field("retry", &self.retry)
            .finish_non_exhaustive()
    }
}
