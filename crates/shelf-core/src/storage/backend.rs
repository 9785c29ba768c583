//! Key-value storage backends
//!
//! A backend maps string keys to string values. The shelf only ever uses a
//! couple of keys, each holding one whole serialized blob, so backends do
//! not need partial updates.
//!
//! - [`FileStore`]: one file per key under a data directory, written atomically
//! - [`MemoryStore`]: a plain in-memory map
//! - [`DisabledStore`]: a medium that is switched off

use std::collections::HashMap;
use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

use tracing::debug;

use super::error::{StorageError, StorageResult};

/// A string key-value store
pub trait KeyValueStore {
    /// Read the value under `key`, `None` if the key is absent
    fn get(&self, key: &str) -> StorageResult<Option<String>>;

    /// Replace the value under `key`
    fn set(&mut self, key: &str, value: &str) -> StorageResult<()>;

    /// Delete `key`; deleting an absent key is not an error
    fn remove(&mut self, key: &str) -> StorageResult<()>;

    /// Whether the medium can be used at all
    fn is_available(&self) -> bool {
        true
    }
}

/// File-backed store
///
/// Key `k` lives in `<dir>/k.json`. The directory is created on first write.
#[derive(Debug, Clone)]
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Path of the file holding `key`
    pub fn path_for(&self, key: &str) -> StorageResult<PathBuf> {
        validate_key(key)?;
        Ok(self.dir.join(format!("{}.json", key)))
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> StorageResult<Option<String>> {
        let path = self.path_for(key)?;

        if !path.exists() {
            return Ok(None);
        }

        let content =
            fs::read_to_string(&path).map_err(|e| StorageError::from_read(e, path.clone()))?;
        debug!("Read {} bytes from {:?}", content.len(), path);
        Ok(Some(content))
    }

    fn set(&mut self, key: &str, value: &str) -> StorageResult<()> {
        let path = self.path_for(key)?;
        atomic_write(&path, value.as_bytes())?;
        debug!("Wrote {} bytes to {:?}", value.len(), path);
        Ok(())
    }

    fn remove(&mut self, key: &str) -> StorageResult<()> {
        let path = self.path_for(key)?;
        if path.exists() {
            fs::remove_file(&path).map_err(|e| StorageError::from_io(e, path.clone()))?;
        }
        Ok(())
    }
}

/// In-memory store, lost when dropped
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    entries: HashMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> StorageResult<Option<String>> {
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> StorageResult<()> {
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&mut self, key: &str) -> StorageResult<()> {
        self.entries.remove(key);
        Ok(())
    }
}

/// A storage medium that is switched off
///
/// Every operation fails with [`StorageError::Unavailable`].
#[derive(Debug, Clone, Default)]
pub struct DisabledStore;

impl DisabledStore {
    fn unavailable<T>() -> StorageResult<T> {
        Err(StorageError::Unavailable {
            reason: "storage is disabled".to_string(),
        })
    }
}

impl KeyValueStore for DisabledStore {
    fn get(&self, _key: &str) -> StorageResult<Option<String>> {
        Self::unavailable()
    }

    fn set(&mut self, _key: &str, _value: &str) -> StorageResult<()> {
        Self::unavailable()
    }

    fn remove(&mut self, _key: &str) -> StorageResult<()> {
        Self::unavailable()
    }

    fn is_available(&self) -> bool {
        false
    }
}

/// Check that `key` can name a stored value
///
/// Keys become file names, so they are limited to ASCII letters, digits,
/// `-`, `_` and `.`, and may not start with a dot.
pub fn validate_key(key: &str) -> StorageResult<()> {
    let valid = !key.is_empty()
        && !key.starts_with('.')
        && key
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.'));

    if valid {
        Ok(())
    } else {
        Err(StorageError::InvalidKey {
            key: key.to_string(),
        })
    }
}

/// Write data to a file atomically
///
/// 1. Write to a temporary file in the same directory
/// 2. Sync the file to disk
/// 3. Rename the temp file to the target path
///
/// The target file is never left in a partially-written state, and the
/// temp file is removed if any step fails.
fn atomic_write(path: &Path, data: &[u8]) -> StorageResult<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(|source| StorageError::CreateDirectory {
            path: parent.to_path_buf(),
            source,
        })?;
    }

    let temp_path = path.with_extension("tmp");

    let result = write_and_rename(&temp_path, path, data);
    if result.is_err() && temp_path.exists() {
        if let Err(e) = fs::remove_file(&temp_path) {
            debug!("Failed to remove temp file {:?}: {}", temp_path, e);
        }
    }
    result
}

fn write_and_rename(temp_path: &Path, path: &Path, data: &[u8]) -> StorageResult<()> {
    let mut file =
        File::create(temp_path).map_err(|e| StorageError::from_io(e, temp_path.to_path_buf()))?;

    file.write_all(data)
        .map_err(|e| StorageError::from_io(e, temp_path.to_path_buf()))?;

    file.sync_all()
        .map_err(|e| StorageError::from_io(e, temp_path.to_path_buf()))?;

    fs::rename(temp_path, path).map_err(|source| StorageError::AtomicWriteFailed {
        from: temp_path.to_path_buf(),
        to: path.to_path_buf(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_file_store_set_and_get() {
        let temp_dir = TempDir::new().unwrap();
        let mut store = FileStore::new(temp_dir.path());

        assert!(store.get("books-key").unwrap().is_none());

        store.set("books-key", "[]").unwrap();
        assert_eq!(store.get("books-key").unwrap().as_deref(), Some("[]"));
        assert!(temp_dir.path().join("books-key.json").exists());

        store.set("books-key", "[1]").unwrap();
        assert_eq!(store.get("books-key").unwrap().as_deref(), Some("[1]"));
    }

    #[test]
    fn test_file_store_remove() {
        let temp_dir = TempDir::new().unwrap();
        let mut store = FileStore::new(temp_dir.path());

        store.set("books-key", "[]").unwrap();
        store.remove("books-key").unwrap();
        assert!(store.get("books-key").unwrap().is_none());

        // Removing again is fine
        store.remove("books-key").unwrap();
    }

    #[test]
    fn test_file_store_creates_data_dir() {
        let temp_dir = TempDir::new().unwrap();
        let nested = temp_dir.path().join("a").join("b");
        let mut store = FileStore::new(&nested);

        store.set("books-key", "[]").unwrap();
        assert!(nested.join("books-key.json").exists());
        assert!(!nested.join("books-key.tmp").exists());
    }

    #[test]
    fn test_file_store_rejects_bad_keys() {
        let temp_dir = TempDir::new().unwrap();
        let mut store = FileStore::new(temp_dir.path());

        for key in ["", "../escape", ".hidden", "a/b", "with space"] {
            let err = store.set(key, "x").unwrap_err();
            assert!(matches!(err, StorageError::InvalidKey { .. }), "key {:?}", key);
        }

        assert!(store.path_for("books-key.corrupt").is_ok());
    }

    #[test]
    fn test_atomic_write_creates_parent_dirs() {
        let temp_dir = TempDir::new().unwrap();
        let nested_path = temp_dir.path().join("x").join("y").join("file.json");

        atomic_write(&nested_path, b"test data").unwrap();

        let content = fs::read_to_string(&nested_path).unwrap();
        assert_eq!(content, "test data");
    }

    #[test]
    fn test_atomic_write_cleans_up_temp_file_on_failure() {
        let temp_dir = TempDir::new().unwrap();
        // A directory in the way makes the final rename fail
        let target = temp_dir.path().join("books-key.json");
        fs::create_dir(&target).unwrap();
        fs::write(target.join("keep"), "x").unwrap();

        let err = atomic_write(&target, b"[]").unwrap_err();
        assert!(matches!(err, StorageError::AtomicWriteFailed { .. }));
        assert!(!temp_dir.path().join("books-key.tmp").exists());
        assert!(target.is_dir());
    }

    #[test]
    fn test_validate_key() {
        for key in ["books-key", "reading_list", "books-key.corrupt", "2024"] {
            assert!(validate_key(key).is_ok(), "key {:?}", key);
        }
        for key in ["", "my books", ".hidden", "a/b", "a\\b", "bücher"] {
            assert!(validate_key(key).is_err(), "key {:?}", key);
        }
    }

    #[test]
    fn test_memory_store() {
        let mut store = MemoryStore::new();
        assert!(store.get("k").unwrap().is_none());

        store.set("k", "v").unwrap();
        assert_eq!(store.get("k").unwrap().as_deref(), Some("v"));

        store.remove("k").unwrap();
        assert!(store.get("k").unwrap().is_none());
    }

    #[test]
    fn test_disabled_store() {
        let mut store = DisabledStore;

        assert!(!store.is_available());
        assert!(store.get("k").unwrap_err().is_unavailable());
        assert!(store.set("k", "v").unwrap_err().is_unavailable());
        assert!(store.remove("k").unwrap_err().is_unavailable());
    }
}
