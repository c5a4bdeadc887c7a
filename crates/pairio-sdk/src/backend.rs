use pairio_remote::{HttpTransport, RemoteClient};
use pairio_store::LocalStore;
use pairio_types::PairioConfig;

use crate::error::SdkResult;

/// A key/value backend the routing layer can dispatch to.
///
/// `key` is the already-validated storage key. Recoverable failures surface
/// as `Ok(None)` / `Ok(false)` so composite strategies can fall through;
/// `Err` is reserved for failures the caller must see.
pub trait Backend: Send + Sync {
    /// Short name used in logs.
    fn name(&self) -> &'static str;

    /// Check that `config` is usable before any backend I/O happens.
    fn prepare(&self, _config: &PairioConfig) -> SdkResult<()> {
        Ok(())
    }

    fn get(&self, collection: &str, key: &str, config: &PairioConfig) -> SdkResult<Option<String>>;

    fn put(
        &self,
        collection: &str,
        key: &str,
        value: Option<&str>,
        config: &PairioConfig,
    ) -> SdkResult<bool>;

    /// Whether the backend is reachable.
    fn probe(&self, _config: &PairioConfig) -> SdkResult<bool> {
        Ok(true)
    }
}

/// The local filesystem store rooted at the call's `database_path`.
#[derive(Clone, Copy, Debug, Default)]
pub struct LocalBackend;

impl Backend for LocalBackend {
    fn name(&self) -> &'static str {
        "local"
    }

    fn get(&self, collection: &str, key: &str, config: &PairioConfig) -> SdkResult<Option<String>> {
        Ok(LocalStore::new(&config.database_path).get(collection, key)?)
    }

    fn put(
        &self,
        collection: &str,
        key: &str,
        value: Option<&str>,
        config: &PairioConfig,
    ) -> SdkResult<bool> {
        Ok(LocalStore::new(&config.database_path).put(collection, key, value)?)
    }

    fn probe(&self, config: &PairioConfig) -> SdkResult<bool> {
        Ok(config.database_path.is_dir())
    }
}

impl<T: HttpTransport> Backend for RemoteClient<T> {
    fn name(&self) -> &'static str {
        "remote"
    }

    fn prepare(&self, config: &PairioConfig) -> SdkResult<()> {
        self.settings(config)?;
        Ok(())
    }

    fn get(&self, collection: &str, key: &str, config: &PairioConfig) -> SdkResult<Option<String>> {
        Ok(RemoteClient::get(self, collection, key, config)?)
    }

    fn put(
        &self,
        collection: &str,
        key: &str,
        value: Option<&str>,
        config: &PairioConfig,
    ) -> SdkResult<bool> {
        Ok(RemoteClient::put(self, collection, key, value, config)?)
    }

    fn probe(&self, config: &PairioConfig) -> SdkResult<bool> {
        Ok(RemoteClient::probe(self, config)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pairio_types::ConfigOverrides;

    #[test]
    fn local_backend_follows_configured_root() {
        let a = tempfile::tempdir().unwrap();
        let b = tempfile::tempdir().unwrap();
        let base = PairioConfig::default();
        let in_a = base.apply(&ConfigOverrides::new().database_path(a.path()));
        let in_b = base.apply(&ConfigOverrides::new().database_path(b.path()));

        assert!(LocalBackend.put("c", "k", Some("v"), &in_a).unwrap());
        assert_eq!(LocalBackend.get("c", "k", &in_a).unwrap().as_deref(), Some("v"));
        assert_eq!(LocalBackend.get("c", "k", &in_b).unwrap(), None);
    }

    #[test]
    fn local_probe_checks_root() {
        let dir = tempfile::tempdir().unwrap();
        let config = PairioConfig::default().apply(&ConfigOverrides::new().database_path(dir.path()));
        assert!(LocalBackend.probe(&config).unwrap());
        let missing = config.apply(&ConfigOverrides::new().database_path(dir.path().join("nope")));
        assert!(!LocalBackend.probe(&missing).unwrap());
    }
}
