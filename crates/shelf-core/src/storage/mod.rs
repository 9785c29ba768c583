//! Storage layer
//!
//! ## Architecture
//!
//! - **Backends** (`backend`): string key-value stores (file, memory, disabled)
//! - **Adapter** (`adapter`): `BookStore`, which keeps the whole collection
//!   under one key and is the only code that talks to a backend
//!
//! Backend failures are typed (`StorageError`) but stop at the adapter.

pub mod adapter;
pub mod backend;
pub mod error;

pub use adapter::{BookStore, DEFAULT_STORAGE_KEY};
pub use backend::{validate_key, DisabledStore, FileStore, KeyValueStore, MemoryStore};
pub use error::{StorageError, StorageResult};
