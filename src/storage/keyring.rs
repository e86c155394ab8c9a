//! OS keyring backend.
//!
//! Stores values in the operating system's secure credential store:
//! - macOS: Keychain
//! - Windows: Credential Manager
//! - Linux: Secret Service (GNOME Keyring / KDE Wallet)
//!
//! All operations fail gracefully. If the keyring is unavailable, the
//! error is returned as `StorageUnavailable` and the caller decides.

use crate::errors::{CacheError, Result};

use super::{validate_storage_key, SecureStore};

/// Service name used in the OS keyring.
const SERVICE_NAME: &str = "credcache";

#[derive(Debug, Clone, Default)]
pub struct KeyringStore;

impl KeyringStore {
    pub fn new() -> Self {
        Self
    }

    fn entry(&self, key: &str) -> Result<keyring::Entry> {
        validate_storage_key(key)?;
        keyring::Entry::new(SERVICE_NAME, key).map_err(|e| {
            CacheError::StorageUnavailable(format!("failed to create keyring entry: {e}"))
        })
    }
}

impl SecureStore for KeyringStore {
    fn get(&self, key: &str) -> Result<Option<Vec<u8>>> {
        match self.entry(key)?.get_secret() {
            Ok(secret) => Ok(Some(secret)),
            Err(keyring::Error::NoEntry) => Ok(None),
            Err(e) => Err(CacheError::StorageUnavailable(format!(
                "failed to read from keyring: {e}"
            ))),
        }
    }

    fn set(&self, key: &str, value: &[u8]) -> Result<()> {
        self.entry(key)?.set_secret(value).map_err(|e| {
            CacheError::StorageUnavailable(format!("failed to store value in keyring: {e}"))
        })
    }

    fn delete(&self, key: &str) -> Result<()> {
        match self.entry(key)?.delete_credential() {
            Ok(()) => Ok(()),
            Err(keyring::Error::NoEntry) => Ok(()), // Already gone, that's fine.
            Err(e) => Err(CacheError::StorageUnavailable(format!(
                "failed to delete from keyring: {e}"
            ))),
        }
    }

    fn backend_name(&self) -> &'static str {
        "keyring"
    }
}
