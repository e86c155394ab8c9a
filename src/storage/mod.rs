//! Secure key-value storage backends.
//!
//! The credential cache only ever talks to a [`SecureStore`]. Backends:
//! - `FileStore`: one owner-only JSON file per key on local disk
//! - `MemoryStore`: in-process map with switchable failures (tests)
//! - `KeyringStore`: the OS credential store (`keyring-store` feature)
//!
//! Every backend failure surfaces as `CacheError::StorageUnavailable`.

pub mod file;
pub mod memory;

#[cfg(feature = "keyring-store")]
pub mod keyring;

use std::path::Path;
use std::sync::Arc;

use crate::config::{Backend, Settings};
use crate::errors::{CacheError, Result};

pub use file::FileStore;
pub use memory::MemoryStore;

/// A blocking get/set/delete store addressed by string keys.
///
/// Implementations provide at-rest protection themselves; callers add no
/// extra encryption layer.
pub trait SecureStore: Send + Sync {
    /// Read the value under `key`, or `None` if nothing is stored.
    fn get(&self, key: &str) -> Result<Option<Vec<u8>>>;

    /// Store `value` under `key`, replacing any previous value.
    fn set(&self, key: &str, value: &[u8]) -> Result<()>;

    /// Remove the value under `key`. Removing an absent key succeeds.
    fn delete(&self, key: &str) -> Result<()>;

    /// Short backend name for log fields.
    fn backend_name(&self) -> &'static str;
}

/// Check that `key` is usable by every backend.
///
/// Keys must be non-empty and contain only ASCII letters, digits, `.`,
/// `-` and `_`. The file backend uses the key as a file name, so this
/// also rules out path separators.
pub fn validate_storage_key(key: &str) -> Result<()> {
    let valid = !key.is_empty()
        && key
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '.' | '-' | '_'))
        && key != "."
        && key != "..";

    if valid {
        Ok(())
    } else {
        Err(CacheError::InvalidStorageKey(key.to_string()))
    }
}

/// Open the backend selected by `settings`.
///
/// Relative store directories are resolved against `project_dir`.
pub fn open_store(settings: &Settings, project_dir: &Path) -> Result<Arc<dyn SecureStore>> {
    match settings.backend {
        Backend::File => Ok(Arc::new(FileStore::new(settings.store_path(project_dir)))),
        Backend::Keyring => open_keyring(),
    }
}

#[cfg(feature = "keyring-store")]
fn open_keyring() -> Result<Arc<dyn SecureStore>> {
    Ok(Arc::new(keyring::KeyringStore::new()))
}

#[cfg(not(feature = "keyring-store"))]
fn open_keyring() -> Result<Arc<dyn SecureStore>> {
    Err(CacheError::ConfigError(
        "keyring backend not compiled — rebuild with `cargo build --features keyring-store`"
            .into(),
    ))
}
