//! Backend selection for the giftpool funding ledger.
//!
//! The host process builds a `StorageConfig` once at startup and hands it to
//! `create_store`, which returns the remote store when a complete remote
//! configuration is present and the local store otherwise. The choice is
//! made exactly once; callers hold an `Arc<dyn FundingStore>` and never need
//! to know which backend is active.

use log::info;
use std::path::PathBuf;
use std::sync::Arc;

use giftpool_core::{FundingStore, Result};
use giftpool_storage_local::LocalStore;
use giftpool_storage_remote::RemoteStore;

/// Connection settings for the hosted table store.
#[derive(Debug, Clone)]
pub struct RemoteConfig {
    pub url: String,
    pub api_key: String,
}

impl RemoteConfig {
    /// A remote configuration only counts when both parts are present.
    pub fn is_complete(&self) -> bool {
        !self.url.trim().is_empty() && !self.api_key.trim().is_empty()
    }
}

/// Storage configuration assembled by the host process at startup.
#[derive(Debug, Clone)]
pub struct StorageConfig {
    /// Data directory for the local store.
    pub data_dir: PathBuf,
    /// Remote connection settings, when the deployment has them.
    pub remote: Option<RemoteConfig>,
}

impl StorageConfig {
    /// Local-only configuration.
    pub fn local(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
            remote: None,
        }
    }

    /// Configuration preferring the remote backend.
    pub fn with_remote(
        data_dir: impl Into<PathBuf>,
        url: impl Into<String>,
        api_key: impl Into<String>,
    ) -> Self {
        Self {
            data_dir: data_dir.into(),
            remote: Some(RemoteConfig {
                url: url.into(),
                api_key: api_key.into(),
            }),
        }
    }
}

/// Which backend a configuration selects.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BackendKind {
    Local,
    Remote,
}

/// Pure selection rule: remote when fully configured, local otherwise.
pub fn select_backend(config: &StorageConfig) -> BackendKind {
    match &config.remote {
        Some(remote) if remote.is_complete() => BackendKind::Remote,
        _ => BackendKind::Local,
    }
}

/// Builds the funding store for this process. Call once at startup; the
/// selection is stable for the process lifetime.
pub fn create_store(config: &StorageConfig) -> Result<Arc<dyn FundingStore>> {
    match (select_backend(config), &config.remote) {
        (BackendKind::Remote, Some(remote)) => {
            info!("Using remote funding store at {}", remote.url);
            Ok(Arc::new(RemoteStore::new(&remote.url, &remote.api_key)?))
        }
        _ => {
            info!(
                "Remote storage not configured, using local store at {}",
                config.data_dir.display()
            );
            Ok(Arc::new(LocalStore::new(&config.data_dir)?))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_selects_local_without_remote_config() {
        let config = StorageConfig::local("/tmp/giftpool");
        assert_eq!(select_backend(&config), BackendKind::Local);
    }

    #[test]
    fn test_selects_remote_when_fully_configured() {
        let config =
            StorageConfig::with_remote("/tmp/giftpool", "https://db.example.com", "service-key");
        assert_eq!(select_backend(&config), BackendKind::Remote);
    }

    #[test]
    fn test_incomplete_remote_config_falls_back_to_local() {
        let config = StorageConfig::with_remote("/tmp/giftpool", "https://db.example.com", "");
        assert_eq!(select_backend(&config), BackendKind::Local);

        let config = StorageConfig::with_remote("/tmp/giftpool", "  ", "service-key");
        assert_eq!(select_backend(&config), BackendKind::Local);
    }

    #[test]
    fn test_create_store_builds_local_backend() {
        let dir = TempDir::new().unwrap();
        let config = StorageConfig::local(dir.path());
        assert!(create_store(&config).is_ok());
    }

    #[test]
    fn test_create_store_builds_remote_backend() {
        let dir = TempDir::new().unwrap();
        let config = StorageConfig::with_remote(dir.path(), "https://db.example.com", "key");
        assert!(create_store(&config).is_ok());
    }
}
