//! Async load/save/clear of the remembered-credentials record.
//!
//! `CredentialCache` owns exactly one storage key. Each operation runs the
//! blocking store call on tokio's blocking pool under an I/O timeout; a
//! timeout is reported as `StorageUnavailable` like any other store error.
//!
//! A blocking store call cannot be cancelled, so one that times out may
//! still complete afterwards. Operations on a cache (and its clones) are
//! serialized until the blocking call really finishes: whatever runs next
//! always observes or overrides the late write, never the other way round.
//! Separate caches over the same store are not coordinated and resolve to
//! whichever write the store applies last.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::Mutex;
use tracing::{debug, error, warn};

use crate::errors::{CacheError, Result};
use crate::storage::{validate_storage_key, SecureStore};

use super::record::StoredCredentialRecord;

/// Default bound for a single storage call.
pub const DEFAULT_IO_TIMEOUT: Duration = Duration::from_secs(5);

#[derive(Clone)]
pub struct CredentialCache {
    store: Arc<dyn SecureStore>,
    key: String,
    timeout: Duration,
    /// Held from the start of a store call until its blocking task exits.
    gate: Arc<Mutex<()>>,
}

impl CredentialCache {
    /// Create a cache over `store` that reads and writes only `key`.
    pub fn new(store: Arc<dyn SecureStore>, key: impl Into<String>) -> Result<Self> {
        let key = key.into();
        validate_storage_key(&key)?;
        Ok(Self {
            store,
            key,
            timeout: DEFAULT_IO_TIMEOUT,
            gate: Arc::new(Mutex::new(())),
        })
    }

    /// Replace the per-operation I/O timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn backend_name(&self) -> &'static str {
        self.store.backend_name()
    }

    /// Load the remembered record.
    ///
    /// Returns `Ok(None)` when nothing is stored and also when the stored
    /// value does not parse; the latter is logged and otherwise ignored.
    /// Storage failures are returned.
    pub async fn load(&self) -> Result<Option<StoredCredentialRecord>> {
        match self.try_load().await {
            Err(CacheError::MalformedRecord(detail)) => {
                warn!(
                    key = %self.key,
                    backend = self.backend_name(),
                    error = %detail,
                    "ignoring malformed remembered credentials"
                );
                Ok(None)
            }
            other => other,
        }
    }

    /// Load the remembered record, reporting unparseable data as
    /// `MalformedRecord` instead of hiding it.
    pub async fn try_load(&self) -> Result<Option<StoredCredentialRecord>> {
        let raw = self.run("load", |store, key| store.get(key)).await?;

        match raw {
            None => {
                debug!(key = %self.key, "no remembered credentials");
                Ok(None)
            }
            Some(bytes) => {
                let record = StoredCredentialRecord::from_bytes(&bytes)?;
                debug!(key = %self.key, "loaded remembered credentials");
                Ok(Some(record))
            }
        }
    }

    /// Remember `email` and `password`, replacing any previous record.
    ///
    /// No validation happens here. The returned record is exactly what was
    /// written. When the store rejects the write the previously stored value
    /// is left as it was. After a timeout the write may still land; the next
    /// operation on this cache runs only once it has.
    pub async fn save(&self, email: &str, password: &str) -> Result<StoredCredentialRecord> {
        let record = StoredCredentialRecord::new(email, password);
        let bytes = record.to_bytes()?;

        self.run("save", move |store, key| store.set(key, &bytes))
            .await?;

        debug!(key = %self.key, backend = self.backend_name(), "saved remembered credentials");
        Ok(record)
    }

    /// Forget the remembered record. Succeeds when nothing was stored.
    ///
    /// Like `save`, a timed-out delete may still take effect later.
    pub async fn clear(&self) -> Result<()> {
        self.run("clear", |store, key| store.delete(key)).await?;
        debug!(key = %self.key, backend = self.backend_name(), "cleared remembered credentials");
        Ok(())
    }

    /// Run one blocking store call off the async thread, bounded by the
    /// configured timeout. Waiting for an earlier call to finish is not
    /// counted against the timeout.
    async fn run<T, F>(&self, op: &'static str, f: F) -> Result<T>
    where
        F: FnOnce(&dyn SecureStore, &str) -> Result<T> + Send + 'static,
        T: Send + 'static,
    {
        let permit = Arc::clone(&self.gate).lock_owned().await;
        let store = Arc::clone(&self.store);
        let key = self.key.clone();
        let task = tokio::task::spawn_blocking(move || {
            let _permit = permit;
            f(store.as_ref(), &key)
        });

        let result = match tokio::time::timeout(self.timeout, task).await {
            Ok(Ok(result)) => result,
            Ok(Err(join_err)) => Err(CacheError::StorageUnavailable(format!(
                "{op} task failed: {join_err}"
            ))),
            Err(_) => Err(CacheError::StorageUnavailable(format!(
                "{op} timed out after {} ms",
                self.timeout.as_millis()
            ))),
        };

        if let Err(CacheError::StorageUnavailable(detail)) = &result {
            error!(
                op,
                key = %self.key,
                backend = self.backend_name(),
                error = %detail,
                "secure storage operation failed"
            );
        }

        result
    }
}

impl std::fmt::Debug for CredentialCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CredentialCache")
            .field("backend", &self.backend_name())
            .field("key", &self.key)
            .field("timeout", &self.timeout)
            .finish()
    }
}
