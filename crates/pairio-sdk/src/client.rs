use std::sync::Arc;

use pairio_remote::RemoteClient;
use pairio_types::{ConfigOverrides, Key, PairioConfig, ReadStrategy, WriteStrategy};
use tracing::debug;

use crate::backend::{Backend, LocalBackend};
use crate::error::SdkResult;
use crate::validation::{check_value, storage_key};

/// High-level Pairio API.
///
/// Holds an immutable configuration snapshot and the two backends. Every
/// call is independent: per-call overrides are merged into a fresh snapshot
/// and never leak into later calls.
pub struct Pairio<L: Backend = LocalBackend, R: Backend = RemoteClient> {
    config: PairioConfig,
    local: Arc<L>,
    remote: Arc<R>,
}

impl Pairio {
    /// Client over the local filesystem store and the HTTP remote.
    pub fn new(config: PairioConfig) -> SdkResult<Self> {
        Ok(Self::with_backends(config, LocalBackend, RemoteClient::new()?))
    }

    /// Client configured from `PAIRIO_*` environment variables.
    pub fn from_env() -> SdkResult<Self> {
        Self::new(PairioConfig::from_env())
    }
}

impl<L: Backend, R: Backend> Pairio<L, R> {
    pub fn with_backends(config: PairioConfig, local: L, remote: R) -> Self {
        Self {
            config,
            local: Arc::new(local),
            remote: Arc::new(remote),
        }
    }

    pub fn config(&self) -> &PairioConfig {
        &self.config
    }

    pub fn local(&self) -> &L {
        &self.local
    }

    pub fn remote(&self) -> &R {
        &self.remote
    }

    /// A client with `overrides` merged into its snapshot, sharing backends
    /// with `self`. `self` is left untouched.
    pub fn reconfigure(&self, overrides: &ConfigOverrides) -> Self {
        Self {
            config: self.config.apply(overrides),
            local: Arc::clone(&self.local),
            remote: Arc::clone(&self.remote),
        }
    }

    pub fn get(&self, key: impl Into<Key>) -> SdkResult<Option<String>> {
        self.get_with(key, &ConfigOverrides::default())
    }

    /// Read `key` under the configured read strategy. A missing key is
    /// `Ok(None)`; only invalid input or unusable configuration is an error.
    pub fn get_with(
        &self,
        key: impl Into<Key>,
        overrides: &ConfigOverrides,
    ) -> SdkResult<Option<String>> {
        let config = self.config.apply(overrides);
        let key = storage_key(&key.into())?;
        let collection = config.collection.as_str();
        debug!(collection, strategy = %config.get_from, "get");

        match config.get_from {
            ReadStrategy::Local => self.local.get(collection, &key, &config),
            ReadStrategy::Remote => {
                self.remote.prepare(&config)?;
                self.remote.get(collection, &key, &config)
            }
            ReadStrategy::LocalThenRemote => {
                // A local hit never needs remote settings.
                if let Some(value) = self.local.get(collection, &key, &config)? {
                    return Ok(Some(value));
                }
                debug!(collection, "local miss; falling through to remote");
                self.remote.prepare(&config)?;
                self.remote.get(collection, &key, &config)
            }
            ReadStrategy::RemoteThenLocal => {
                self.remote.prepare(&config)?;
                if let Some(value) = self.remote.get(collection, &key, &config)? {
                    return Ok(Some(value));
                }
                debug!(collection, "remote miss; falling through to local");
                self.local.get(collection, &key, &config)
            }
        }
    }

    pub fn set(&self, key: impl Into<Key>, value: Option<&str>) -> SdkResult<bool> {
        self.set_with(key, value, &ConfigOverrides::default())
    }

    /// Write `value` under `key`, or delete it when `value` is `None`.
    ///
    /// Returns `true` when every participating backend reported success.
    /// A `local_and_remote` write is not rolled back when the remote half
    /// fails.
    pub fn set_with(
        &self,
        key: impl Into<Key>,
        value: Option<&str>,
        overrides: &ConfigOverrides,
    ) -> SdkResult<bool> {
        let config = self.config.apply(overrides);
        check_value(value)?;
        let key = storage_key(&key.into())?;
        let collection = config.collection.as_str();
        if config.set_to.uses_remote() {
            self.remote.prepare(&config)?;
        }
        debug!(collection, strategy = %config.set_to, delete = value.is_none(), "set");

        match config.set_to {
            WriteStrategy::Local => self.local.put(collection, &key, value, &config),
            WriteStrategy::Remote => self.remote.put(collection, &key, value, &config),
            WriteStrategy::LocalAndRemote => {
                let local = self.local.put(collection, &key, value, &config)?;
                let remote = self.remote.put(collection, &key, value, &config)?;
                Ok(local && remote)
            }
        }
    }

    /// Remove `key`; shorthand for `set(key, None)`.
    pub fn delete(&self, key: impl Into<Key>) -> SdkResult<bool> {
        self.set(key, None)
    }

    /// Whether the remote service answers its health probe.
    pub fn probe_remote(&self) -> SdkResult<bool> {
        self.remote.probe(&self.config)
    }
}

impl<L: Backend, R: Backend> Clone for Pairio<L, R> {
    fn clone(&self) -> Self {
        self.reconfigure(&ConfigOverrides::default())
    }
}

impl<L: Backend, R: Backend> std::fmt::Debug for Pairio<L, R> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Pairio")
            .field("config", &self.config)
            .field("local", &self.local.name())
            .field("remote", &self.remote.name())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::SdkError;
    use std::collections::HashMap;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;

    /// In-memory backend that counts calls.
    #[derive(Default)]
    struct Recording {
        entries: Mutex<HashMap<(String, String), String>>,
        gets: AtomicUsize,
        puts: AtomicUsize,
        fail_puts: bool,
    }

    impl Recording {
        fn failing() -> Self {
            Self {
                fail_puts: true,
                ..Self::default()
            }
        }

        fn seed(&self, collection: &str, key: &str, value: &str) {
            self.entries
                .lock()
                .unwrap()
                .insert((collection.into(), key.into()), value.into());
        }
    }

    impl Backend for Recording {
        fn name(&self) -> &'static str {
            "recording"
        }

        fn get(&self, collection: &str, key: &str, _: &PairioConfig) -> SdkResult<Option<String>> {
            self.gets.fetch_add(1, Ordering::SeqCst);
            Ok(self
                .entries
                .lock()
                .unwrap()
                .get(&(collection.to_owned(), key.to_owned()))
                .cloned())
        }

        fn put(
            &self,
            collection: &str,
            key: &str,
            value: Option<&str>,
            _: &PairioConfig,
        ) -> SdkResult<bool> {
            self.puts.fetch_add(1, Ordering::SeqCst);
            if self.fail_puts {
                return Ok(false);
            }
            let mut entries = self.entries.lock().unwrap();
            let slot = (collection.to_owned(), key.to_owned());
            match value {
                Some(v) => entries.insert(slot, v.to_owned()),
                None => entries.remove(&slot),
            };
            Ok(true)
        }
    }

    fn pairio(local: Recording, remote: Recording) -> Pairio<Recording, Recording> {
        Pairio::with_backends(PairioConfig::default(), local, remote)
    }

    fn reads(strategy: ReadStrategy) -> ConfigOverrides {
        ConfigOverrides::new().get_from(strategy)
    }

    fn writes(strategy: WriteStrategy) -> ConfigOverrides {
        ConfigOverrides::new().set_to(strategy)
    }

    #[test]
    fn local_read_never_touches_remote() {
        let p = pairio(Recording::default(), Recording::default());
        assert_eq!(p.get("k").unwrap(), None);
        assert_eq!(p.local().gets.load(Ordering::SeqCst), 1);
        assert_eq!(p.remote().gets.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn local_then_remote_stops_on_local_hit() {
        let local = Recording::default();
        local.seed("default", "k", "from-local");
        let p = pairio(local, Recording::default());
        let v = p.get_with("k", &reads(ReadStrategy::LocalThenRemote)).unwrap();
        assert_eq!(v.as_deref(), Some("from-local"));
        assert_eq!(p.remote().gets.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn local_then_remote_falls_through_on_miss() {
        let remote = Recording::default();
        remote.seed("default", "k", "from-remote");
        let p = pairio(Recording::default(), remote);
        let v = p.get_with("k", &reads(ReadStrategy::LocalThenRemote)).unwrap();
        assert_eq!(v.as_deref(), Some("from-remote"));
        assert_eq!(p.local().gets.load(Ordering::SeqCst), 1);
        assert_eq!(p.remote().gets.load(Ordering::SeqCst), 1);
    }

    fn unconfigured_remote() -> RemoteClient {
        RemoteClient::new().unwrap().with_env(|_| None)
    }

    #[test]
    fn local_then_remote_hit_needs_no_remote_settings() {
        let local = Recording::default();
        local.seed("default", "alpha", "hello");
        let p = Pairio::with_backends(PairioConfig::default(), local, unconfigured_remote());
        let v = p
            .get_with("alpha", &reads(ReadStrategy::LocalThenRemote))
            .unwrap();
        assert_eq!(v.as_deref(), Some("hello"));
    }

    #[test]
    fn local_then_remote_miss_requires_remote_settings() {
        let p = Pairio::with_backends(
            PairioConfig::default(),
            Recording::default(),
            unconfigured_remote(),
        );
        let err = p
            .get_with("alpha", &reads(ReadStrategy::LocalThenRemote))
            .unwrap_err();
        assert!(matches!(err, SdkError::Remote(ref e) if e.is_config_error()));
        assert_eq!(p.local().gets.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn remote_then_local_checks_settings_before_any_read() {
        let p = Pairio::with_backends(
            PairioConfig::default(),
            Recording::default(),
            unconfigured_remote(),
        );
        let err = p
            .get_with("alpha", &reads(ReadStrategy::RemoteThenLocal))
            .unwrap_err();
        assert!(matches!(err, SdkError::Remote(ref e) if e.is_config_error()));
        assert_eq!(p.local().gets.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn remote_then_local_prefers_remote() {
        let local = Recording::default();
        local.seed("default", "k", "from-local");
        let remote = Recording::default();
        remote.seed("default", "k", "from-remote");
        let p = pairio(local, remote);
        let v = p.get_with("k", &reads(ReadStrategy::RemoteThenLocal)).unwrap();
        assert_eq!(v.as_deref(), Some("from-remote"));
        assert_eq!(p.local().gets.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn remote_then_local_misses_both() {
        let p = pairio(Recording::default(), Recording::default());
        let v = p.get_with("k", &reads(ReadStrategy::RemoteThenLocal)).unwrap();
        assert_eq!(v, None);
        assert_eq!(p.local().gets.load(Ordering::SeqCst), 1);
        assert_eq!(p.remote().gets.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn remote_write_skips_local() {
        let p = pairio(Recording::default(), Recording::default());
        assert!(p.set_with("k", Some("v"), &writes(WriteStrategy::Remote)).unwrap());
        assert_eq!(p.local().puts.load(Ordering::SeqCst), 0);
        assert_eq!(p.remote().puts.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn dual_write_partial_failure_keeps_local_value() {
        let p = pairio(Recording::default(), Recording::failing());
        let ok = p
            .set_with("k", Some("v"), &writes(WriteStrategy::LocalAndRemote))
            .unwrap();
        assert!(!ok);
        assert_eq!(p.remote().puts.load(Ordering::SeqCst), 1);
        assert_eq!(p.get("k").unwrap().as_deref(), Some("v"));
    }

    #[test]
    fn dual_write_success_reaches_both() {
        let p = pairio(Recording::default(), Recording::default());
        assert!(p
            .set_with("k", Some("v"), &writes(WriteStrategy::LocalAndRemote))
            .unwrap());
        let remote = p.get_with("k", &reads(ReadStrategy::Remote)).unwrap();
        assert_eq!(remote.as_deref(), Some("v"));
        assert_eq!(p.get("k").unwrap().as_deref(), Some("v"));
    }

    #[test]
    fn validation_precedes_backend_calls() {
        let p = pairio(Recording::default(), Recording::default());
        let err = p.set("k", Some("x".repeat(81).as_str())).unwrap_err();
        assert!(matches!(err, SdkError::ValueTooLong { .. }));
        let err = p.get("k".repeat(81)).unwrap_err();
        assert!(matches!(err, SdkError::KeyTooLong { .. }));
        assert_eq!(p.local().puts.load(Ordering::SeqCst), 0);
        assert_eq!(p.local().gets.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn collection_override_scopes_keys() {
        let p = pairio(Recording::default(), Recording::default());
        p.set_with("k", Some("a"), &ConfigOverrides::new().collection("one"))
            .unwrap();
        assert_eq!(p.get("k").unwrap(), None);
        let v = p.get_with("k", &ConfigOverrides::new().collection("one")).unwrap();
        assert_eq!(v.as_deref(), Some("a"));
    }

    #[test]
    fn reconfigure_leaves_original_untouched() {
        let p = pairio(Recording::default(), Recording::default());
        let q = p.reconfigure(&writes(WriteStrategy::Remote));
        assert_eq!(q.config().set_to, WriteStrategy::Remote);
        assert_eq!(q.config().get_from, ReadStrategy::Local);
        assert_eq!(p.config().set_to, WriteStrategy::Local);

        q.set("k", Some("v")).unwrap();
        // Shared backends: the original client sees the same remote.
        assert_eq!(p.remote().puts.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn delete_removes_value() {
        let p = pairio(Recording::default(), Recording::default());
        p.set("k", Some("v")).unwrap();
        assert!(p.delete("k").unwrap());
        assert_eq!(p.get("k").unwrap(), None);
    }

    #[test]
    fn debug_names_backends() {
        let p = pairio(Recording::default(), Recording::default());
        let debug = format!("{p:?}");
        assert!(debug.contains("Pairio"));
        assert!(debug.contains("recording"));
    }
}
