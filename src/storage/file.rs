//! On-disk store: one file per key inside a private directory.

use std::fs;
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

use tempfile::NamedTempFile;

use crate::errors::{CacheError, Result};

use super::{validate_storage_key, SecureStore};

/// Stores each key as `<dir>/<key>.json`.
///
/// Each write goes to its own temp file in the same directory and is
/// renamed over the target, so a reader never observes a half-written
/// value and overlapping writers never clobber each other's staging file.
#[derive(Debug, Clone)]
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Directory holding the stored values.
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Path of the file backing `key`.
    pub fn path_for(&self, key: &str) -> Result<PathBuf> {
        validate_storage_key(key)?;
        Ok(self.dir.join(format!("{key}.json")))
    }

    fn ensure_dir(&self) -> Result<()> {
        if self.dir.is_dir() {
            return Ok(());
        }
        fs::create_dir_all(&self.dir).map_err(|e| {
            unavailable(format!("cannot create store directory {}: {e}", self.dir.display()))
        })?;

        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            let _ = fs::set_permissions(&self.dir, fs::Permissions::from_mode(0o700));
        }

        Ok(())
    }
}

impl SecureStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<Vec<u8>>> {
        let path = self.path_for(key)?;
        match fs::read(&path) {
            Ok(bytes) => Ok(Some(bytes)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(unavailable(format!("failed to read {}: {e}", path.display()))),
        }
    }

    fn set(&self, key: &str, value: &[u8]) -> Result<()> {
        let path = self.path_for(key)?;
        self.ensure_dir()?;

        // A fresh temp file per write keeps concurrent writers from sharing
        // a staging path. It is created owner-only.
        let mut tmp = NamedTempFile::new_in(&self.dir).map_err(|e| {
            unavailable(format!("failed to create temp file in {}: {e}", self.dir.display()))
        })?;
        tmp.write_all(value)
            .and_then(|()| tmp.as_file().sync_all())
            .map_err(|e| unavailable(format!("failed to write {}: {e}", tmp.path().display())))?;

        tmp.persist(&path)
            .map(|_| ())
            .map_err(|e| unavailable(format!("failed to replace {}: {}", path.display(), e.error)))
    }

    fn delete(&self, key: &str) -> Result<()> {
        let path = self.path_for(key)?;
        match fs::remove_file(&path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()), // Already gone.
            Err(e) => Err(unavailable(format!("failed to delete {}: {e}", path.display()))),
        }
    }

    fn backend_name(&self) -> &'static str {
        "file"
    }
}

fn unavailable(msg: String) -> CacheError {
    CacheError::StorageUnavailable(msg)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn store() -> (TempDir, FileStore) {
        let tmp = TempDir::new().unwrap();
        let store = FileStore::new(tmp.path().join("store"));
        (tmp, store)
    }

    fn dir_entries(store: &FileStore) -> Vec<String> {
        let mut names: Vec<String> = fs::read_dir(store.dir())
            .unwrap()
            .map(|entry| entry.unwrap().file_name().to_string_lossy().into_owned())
            .collect();
        names.sort();
        names
    }

    #[test]
    fn get_missing_key_is_none() {
        let (_tmp, store) = store();
        assert_eq!(store.get("nothing").unwrap(), None);
    }

    #[test]
    fn set_creates_directory_and_replaces_value() {
        let (_tmp, store) = store();
        store.set("k", b"first").unwrap();
        store.set("k", b"second").unwrap();
        assert_eq!(store.get("k").unwrap().as_deref(), Some(&b"second"[..]));
        assert_eq!(dir_entries(&store), vec!["k.json".to_string()]);
    }

    #[test]
    fn concurrent_writers_each_land_a_whole_value() {
        let (_tmp, store) = store();
        let values: Vec<Vec<u8>> = (0..8)
            .map(|i| {
                let pad = "x".repeat(4096);
                format!("{{\"writer\":{i},\"pad\":\"{pad}\"}}").into_bytes()
            })
            .collect();

        std::thread::scope(|scope| {
            let handles: Vec<_> = values
                .iter()
                .map(|value| {
                    let store = store.clone();
                    scope.spawn(move || {
                        for _ in 0..20 {
                            store.set("k", value)?;
                        }
                        Ok::<(), CacheError>(())
                    })
                })
                .collect();
            for handle in handles {
                handle.join().unwrap().unwrap();
            }
        });

        let stored = store.get("k").unwrap().unwrap();
        assert!(values.contains(&stored));
        assert_eq!(dir_entries(&store), vec!["k.json".to_string()]);
    }

    #[test]
    fn delete_is_idempotent() {
        let (_tmp, store) = store();
        store.delete("k").unwrap();
        store.set("k", b"v").unwrap();
        store.delete("k").unwrap();
        store.delete("k").unwrap();
        assert_eq!(store.get("k").unwrap(), None);
    }

    #[test]
    fn rejects_keys_that_escape_the_directory() {
        let (_tmp, store) = store();
        assert!(matches!(
            store.set("../outside", b"x"),
            Err(CacheError::InvalidStorageKey(_))
        ));
    }

    #[cfg(unix)]
    #[test]
    fn stored_file_is_owner_only() {
        use std::os::unix::fs::PermissionsExt;

        let (_tmp, store) = store();
        store.set("k", b"v").unwrap();
        let mode = fs::metadata(store.dir().join("k.json"))
            .unwrap()
            .permissions()
            .mode();
        assert_eq!(mode & 0o777, 0o600);
    }

    #[test]
    fn unwritable_location_is_storage_unavailable() {
        let tmp = TempDir::new().unwrap();
        // A regular file where the store directory should be.
        let blocker = tmp.path().join("blocker");
        fs::write(&blocker, b"not a directory").unwrap();

        let store = FileStore::new(&blocker);
        assert!(matches!(
            store.set("k", b"v"),
            Err(CacheError::StorageUnavailable(_))
        ));
    }
}
