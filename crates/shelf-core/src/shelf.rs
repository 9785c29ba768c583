//! Shelf operations
//!
//! The `Shelf` is the main entry point. Every mutation follows the same
//! steps:
//!
//! 1. load the full collection from the [`BookStore`]
//! 2. change it in memory
//! 3. save the full collection back
//! 4. send a render signal
//!
//! The signal is only sent once the save has returned, and never for an
//! operation that changed nothing (unknown id, declined removal).
//!
//! ## Usage
//!
//! ```ignore
//! let config = Config::load()?;
//! let (mut shelf, receiver) = Shelf::open_with_config(&config);
//!
//! let book = shelf.add_book(NewBook::new("Dune", "Herbert", "1965", false));
//! shelf.mark_as_read(book.id);
//!
//! if receiver.pending() > 0 {
//!     let shelves = shelf.shelves();
//! }
//! ```

use tracing::{debug, info};

use crate::config::Config;
use crate::id::IdGenerator;
use crate::models::{Book, BookId, NewBook, Shelves};
use crate::query;
use crate::render::{self, RenderReceiver, RenderTrigger};
use crate::storage::BookStore;

/// Result of a mutation that targets an existing book
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MutationOutcome {
    /// The change was saved; carries the book as it is after the change
    /// (or as it was, for a removal)
    Applied(Book),
    /// No book has that id; nothing changed
    NotFound,
    /// The removal was not confirmed; nothing changed
    Cancelled,
}

impl MutationOutcome {
    pub fn book(&self) -> Option<&Book> {
        match self {
            MutationOutcome::Applied(book) => Some(book),
            _ => None,
        }
    }
}

/// The bookshelf
pub struct Shelf {
    store: BookStore,
    trigger: RenderTrigger,
    ids: IdGenerator,
}

impl Shelf {
    /// Create a shelf over `store` that announces changes on `trigger`
    pub fn new(store: BookStore, trigger: RenderTrigger) -> Self {
        Self {
            store,
            trigger,
            ids: IdGenerator::new(),
        }
    }

    /// Replace the id generator
    pub fn with_id_generator(mut self, ids: IdGenerator) -> Self {
        self.ids = ids;
        self
    }

    /// Open the shelf described by `config`
    ///
    /// Stores an empty collection on first run. Returns the receiver for
    /// the shelf's render signals.
    pub fn open_with_config(config: &Config) -> (Self, RenderReceiver) {
        let mut store = BookStore::new(config.open_backend(), config.storage_key.clone());
        store.initialize();

        let (trigger, receiver) = render::channel();
        (Self::new(store, trigger), receiver)
    }

    /// The underlying store adapter
    pub fn store(&self) -> &BookStore {
        &self.store
    }

    // ==================== Mutations ====================

    /// Add a book built from raw input
    pub fn add_book(&mut self, input: NewBook) -> Book {
        let mut books = self.store.load();
        let id = self.ids.next(&books);
        let book = Book::from_input(id, input);

        books.push(book.clone());
        self.commit(&books);

        info!("Added book {} ({})", book.id, book.title);
        book
    }

    /// Mark a book as read
    pub fn mark_as_read(&mut self, id: BookId) -> MutationOutcome {
        self.set_completed(id, true)
    }

    /// Mark a book as not read yet
    pub fn mark_as_unread(&mut self, id: BookId) -> MutationOutcome {
        self.set_completed(id, false)
    }

    /// Set the read state of the first book with `id`
    pub fn set_completed(&mut self, id: BookId, is_completed: bool) -> MutationOutcome {
        let mut books = self.store.load();
        let Some(index) = query::index_of(&books, id) else {
            debug!("No book {} to mark, ignoring", id);
            return MutationOutcome::NotFound;
        };

        books[index].is_completed = is_completed;
        let book = books[index].clone();
        self.commit(&books);

        info!("Marked book {} as {}", id, if is_completed { "read" } else { "unread" });
        MutationOutcome::Applied(book)
    }

    /// Remove the first book with `id`
    ///
    /// `confirmed` is the user's answer to the removal prompt; without it
    /// nothing is touched.
    pub fn remove_book(&mut self, id: BookId, confirmed: bool) -> MutationOutcome {
        if !confirmed {
            debug!("Removal of book {} not confirmed", id);
            return MutationOutcome::Cancelled;
        }

        let mut books = self.store.load();
        let Some(index) = query::index_of(&books, id) else {
            debug!("No book {} to remove, ignoring", id);
            return MutationOutcome::NotFound;
        };

        let book = books.remove(index);
        self.commit(&books);

        info!("Removed book {} ({})", book.id, book.title);
        MutationOutcome::Applied(book)
    }

    /// Remove every book
    pub fn clear(&mut self) {
        self.store.clear();
        self.store.initialize();
        self.trigger.notify();
        info!("Cleared shelf");
    }

    /// Ask the render consumer to draw without changing anything
    pub fn request_render(&self) {
        self.trigger.notify();
    }

    // ==================== Queries ====================

    /// All books in insertion order
    pub fn books(&self) -> Vec<Book> {
        self.store.load()
    }

    /// All books split into unread and read
    pub fn shelves(&self) -> Shelves {
        query::partition(&self.store.load())
    }

    /// Look up a single book
    pub fn get(&self, id: BookId) -> Option<Book> {
        query::find_by_id(&self.store.load(), id).cloned()
    }

    /// Books whose title contains `keyword`, ignoring case
    ///
    /// Sends no render signal; the caller shows the result directly.
    pub fn search_by_title(&self, keyword: &str) -> Vec<Book> {
        query::search_by_title(&self.store.load(), keyword)
    }

    /// Save the collection, then announce the change
    fn commit(&mut self, books: &[Book]) {
        self.store.save(books);
        self.trigger.notify();
    }
}
