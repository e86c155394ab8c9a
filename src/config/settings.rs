use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::errors::{CacheError, Result};
use crate::storage::validate_storage_key;

/// Which secure store backs the credential cache.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Backend {
    /// Owner-only files under `store_dir`.
    File,
    /// The OS keyring (requires the `keyring-store` feature).
    Keyring,
}

/// Project-level configuration, loaded from `.credcache.toml`.
///
/// Every field has a sensible default so credcache works out-of-the-box
/// without any config file at all.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Key the remembered record is stored under.
    #[serde(default = "default_storage_key")]
    pub storage_key: String,

    /// Secure store backend.
    #[serde(default = "default_backend")]
    pub backend: Backend,

    /// Directory (relative to project root) for the file backend.
    #[serde(default = "default_store_dir")]
    pub store_dir: String,

    /// Upper bound for a single storage operation, in milliseconds.
    #[serde(default = "default_io_timeout_ms")]
    pub io_timeout_ms: u64,
}

// ── Serde default helpers ────────────────────────────────────────────

fn default_storage_key() -> String {
    "remember_me_credentials".to_string()
}

fn default_backend() -> Backend {
    Backend::File
}

fn default_store_dir() -> String {
    ".credcache".to_string()
}

fn default_io_timeout_ms() -> u64 {
    5_000
}

// ── Implementation ───────────────────────────────────────────────────

impl Default for Settings {
    fn default() -> Self {
        Self {
            storage_key: default_storage_key(),
            backend: default_backend(),
            store_dir: default_store_dir(),
            io_timeout_ms: default_io_timeout_ms(),
        }
    }
}

impl Settings {
    /// Name of the config file we look for in the project root.
    const FILE_NAME: &'static str = ".credcache.toml";

    /// Load settings from `<project_dir>/.credcache.toml`.
    ///
    /// If the file does not exist, sensible defaults are returned.
    /// If the file exists but cannot be parsed, or names an unusable
    /// storage key, an error is returned.
    pub fn load(project_dir: &Path) -> Result<Self> {
        let config_path = project_dir.join(Self::FILE_NAME);

        if !config_path.exists() {
            return Ok(Self::default());
        }

        let contents = std::fs::read_to_string(&config_path)?;

        let settings: Settings = toml::from_str(&contents).map_err(|e| {
            CacheError::ConfigError(format!("Failed to parse {}: {e}", config_path.display()))
        })?;

        settings.validate()?;
        Ok(settings)
    }

    /// Reject values no backend can work with.
    pub fn validate(&self) -> Result<()> {
        validate_storage_key(&self.storage_key)?;
        if self.io_timeout_ms == 0 {
            return Err(CacheError::ConfigError(
                "io_timeout_ms must be greater than zero".into(),
            ));
        }
        Ok(())
    }

    /// Full path of the file backend's directory.
    ///
    /// Example: `project_dir/.credcache`
    pub fn store_path(&self, project_dir: &Path) -> PathBuf {
        project_dir.join(&self.store_dir)
    }

    pub fn io_timeout(&self) -> Duration {
        Duration::from_millis(self.io_timeout_ms)
    }
}

// ── Tests ────────────────────────────────────────────────────────────
