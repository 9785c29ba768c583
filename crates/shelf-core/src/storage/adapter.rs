//! Book collection persistence
//!
//! [`BookStore`] is the only component that touches storage. The whole
//! collection lives under a single key as one JSON array and is always
//! read and written wholesale.
//!
//! Storage problems never reach the caller: an unusable backend reads as
//! an empty shelf and swallows writes, and an unreadable blob reads as an
//! empty shelf and is copied to a backup key before the next save replaces
//! it.

use serde_json::{Map, Value};
use tracing::{debug, warn};

use super::backend::{KeyValueStore, MemoryStore};
use super::error::StorageResult;
use crate::models::Book;

/// Default key the collection is stored under
pub const DEFAULT_STORAGE_KEY: &str = "books-key";

/// Suffix of the key that receives an unreadable blob
const CORRUPT_SUFFIX: &str = "corrupt";

/// Reads and writes the full book collection
pub struct BookStore {
    backend: Box<dyn KeyValueStore>,
    key: String,
}

impl BookStore {
    /// Store the collection under `key` in `backend`
    pub fn new(backend: Box<dyn KeyValueStore>, key: impl Into<String>) -> Self {
        Self {
            backend,
            key: key.into(),
        }
    }

    /// Non-persistent store under the default key
    pub fn in_memory() -> Self {
        Self::new(Box::new(MemoryStore::new()), DEFAULT_STORAGE_KEY)
    }

    /// Key the collection lives under
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Key an unreadable blob is moved to
    pub fn backup_key(&self) -> String {
        format!("{}.{}", self.key, CORRUPT_SUFFIX)
    }

    /// The underlying backend
    pub fn backend(&self) -> &dyn KeyValueStore {
        self.backend.as_ref()
    }

    pub fn is_available(&self) -> bool {
        self.backend.is_available()
    }

    /// Try a read under the collection key
    ///
    /// `load` and `save` hide storage errors. This reports the error they
    /// would hit, so a caller can tell the user that nothing will be saved.
    pub fn check(&self) -> StorageResult<()> {
        self.backend.get(&self.key).map(|_| ())
    }

    /// Load the full collection
    ///
    /// Returns an empty collection when nothing is stored yet, when storage
    /// is unavailable, or when the stored blob cannot be decoded.
    pub fn load(&self) -> Vec<Book> {
        let raw = match self.backend.get(&self.key) {
            Ok(Some(raw)) => raw,
            Ok(None) => {
                debug!("No books stored under '{}'", self.key);
                return Vec::new();
            }
            Err(e) if e.is_unavailable() => {
                debug!("Storage unavailable, reading empty shelf: {}", e);
                return Vec::new();
            }
            Err(e) => {
                warn!("Failed to read books, reading empty shelf: {}", e);
                return Vec::new();
            }
        };

        match decode(&raw) {
            Ok(books) => {
                debug!("Loaded {} books from '{}'", books.len(), self.key);
                books
            }
            Err(e) => {
                warn!("Stored books under '{}' are unreadable: {}", self.key, e);
                Vec::new()
            }
        }
    }

    /// Replace the stored collection with `books`
    ///
    /// A failed write is logged and otherwise ignored.
    pub fn save(&mut self, books: &[Book]) {
        let encoded = match serde_json::to_string(books) {
            Ok(encoded) => encoded,
            Err(e) => {
                warn!("Failed to encode books: {}", e);
                return;
            }
        };

        self.preserve_unreadable();

        match self.backend.set(&self.key, &encoded) {
            Ok(()) => debug!("Saved {} books under '{}'", books.len(), self.key),
            Err(e) if e.is_unavailable() => {
                debug!("Storage unavailable, changes not persisted: {}", e)
            }
            Err(e) => warn!("Failed to save books, changes not persisted: {}", e),
        }
    }

    /// First-run setup: store an empty collection if nothing is stored yet
    pub fn initialize(&mut self) {
        match self.backend.get(&self.key) {
            Ok(None) => self.save(&[]),
            Ok(Some(_)) => {}
            Err(e) => debug!("Skipping initialization: {}", e),
        }
    }

    /// Delete the stored collection
    pub fn clear(&mut self) {
        match self.backend.remove(&self.key) {
            Ok(()) => debug!("Cleared '{}'", self.key),
            Err(e) if e.is_unavailable() => debug!("Storage unavailable, nothing to clear: {}", e),
            Err(e) => warn!("Failed to clear '{}': {}", self.key, e),
        }
    }

    /// Copy an unreadable blob to the backup key before it is overwritten
    fn preserve_unreadable(&mut self) {
        let raw = match self.backend.get(&self.key) {
            Ok(Some(raw)) => raw,
            _ => return,
        };
        if decode(&raw).is_ok() {
            return;
        }

        let backup_key = self.backup_key();
        match self.backend.set(&backup_key, &raw) {
            Ok(()) => warn!("Moved unreadable books blob to '{}'", backup_key),
            Err(e) => warn!("Failed to back up unreadable books blob: {}", e),
        }
    }
}

/// Decode a stored blob
///
/// An empty JSON object is an older placeholder for "no books" and decodes
/// to an empty collection.
fn decode(raw: &str) -> Result<Vec<Book>, serde_json::Error> {
    match serde_json::from_str::<Vec<Book>>(raw) {
        Ok(books) => Ok(books),
        Err(e) => match serde_json::from_str::<Map<String, Value>>(raw) {
            Ok(map) if map.is_empty() => {
                debug!("Read empty-object placeholder as empty shelf");
                Ok(Vec::new())
            }
            _ => Err(e),
        },
    }
}
