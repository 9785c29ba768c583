//! shelf core library
//!
//! This crate provides the core functionality for shelf, a local-first
//! bookshelf manager: book records with a read/unread state, persisted as a
//! single JSON blob in a key-value store.
//!
//! # Architecture
//!
//! - **Storage**: the whole collection lives under one key and is read and
//!   written wholesale through `BookStore`
//! - **Render signals**: every saved mutation announces itself on a
//!   single-consumer channel; the consumer re-reads storage to draw
//!
//! # Quick Start
//!
//! ```text
//! let config = Config::load()?;
//! let (mut shelf, receiver) = Shelf::open_with_config(&config);
//!
//! // Add a book
//! let book = shelf.add_book(NewBook::new("Dune", "Herbert", "1965", false));
//! shelf.mark_as_read(book.id);
//!
//! // Draw both lists
//! let shelves = shelf.shelves();
//! ```
//!
//! # Modules
//!
//! - `shelf`: mutation and query entry point (main entry point)
//! - `models`: book record, id, year, partitions
//! - `query`: lookups and title search over a loaded collection
//! - `render`: render signal channel
//! - `storage`: key-value backends and the collection adapter
//! - `id`: book id generation
//! - `config`: application configuration

pub mod config;
pub mod id;
pub mod models;
pub mod query;
pub mod render;
pub mod shelf;
pub mod storage;

pub use config::Config;
pub use id::IdGenerator;
pub use models::{Book, BookId, NewBook, Shelves, Year};
pub use render::{RenderReceiver, RenderSignal, RenderTrigger};
pub use shelf::{MutationOutcome, Shelf};
pub use storage::{BookStore, KeyValueStore, StorageError};
