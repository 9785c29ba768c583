//! Book command handlers
//!
//! Handlers only call into the shelf. Drawing the shelves after a change
//! is left to the view, which picks up the shelf's render signal.

use anyhow::{bail, Result};

use shelf_core::{BookId, MutationOutcome, NewBook, Shelf, Year};

use crate::output::Output;
use crate::prompt::confirm;
use crate::view::ShelfView;

const REMOVE_PROMPT: &str = "Are you sure you want to delete this book?";

/// Add a new book
pub fn add(
    shelf: &mut Shelf,
    title: String,
    author: String,
    year: String,
    read: bool,
    output: &Output,
) -> Result<()> {
    let book = shelf.add_book(NewBook::new(title, author, Year::Text(year), read));
    output.success(&format!("Added book: {} - {}", book.id, book.title));
    Ok(())
}

/// Draw both shelves
pub fn list(shelf: &Shelf) -> Result<()> {
    shelf.request_render();
    Ok(())
}

/// Show a single book
pub fn show(shelf: &Shelf, id: String, output: &Output) -> Result<()> {
    let id = parse_book_id(&id)?;

    let book = shelf
        .get(id)
        .ok_or_else(|| anyhow::anyhow!("Book not found: {}", id))?;

    output.print_book(&book);
    Ok(())
}

/// Mark a book as read or unread
pub fn mark(shelf: &mut Shelf, id: String, read: bool, output: &Output) -> Result<()> {
    let id = parse_book_id(&id)?;

    let outcome = if read {
        shelf.mark_as_read(id)
    } else {
        shelf.mark_as_unread(id)
    };

    match outcome {
        MutationOutcome::Applied(book) => {
            let state = if read { "read" } else { "unread" };
            output.success(&format!("Marked as {}: {}", state, book.title));
        }
        MutationOutcome::NotFound => output.message(&format!("No book with id {}.", id)),
        MutationOutcome::Cancelled => {}
    }
    Ok(())
}

/// Remove a book, asking first unless `yes` is set
pub fn remove(shelf: &mut Shelf, id: String, yes: bool, output: &Output) -> Result<()> {
    let id = parse_book_id(&id)?;

    let Some(book) = shelf.get(id) else {
        output.message(&format!("No book with id {}.", id));
        return Ok(());
    };

    let confirmed = if yes {
        true
    } else if output.should_prompt() {
        println!("Delete book: {} - {}", book.id, book.title);
        confirm(REMOVE_PROMPT)?
    } else {
        false
    };

    match shelf.remove_book(id, confirmed) {
        MutationOutcome::Applied(book) => {
            output.success(&format!("Removed book: {} - {}", book.id, book.title))
        }
        MutationOutcome::NotFound => output.message(&format!("No book with id {}.", id)),
        MutationOutcome::Cancelled => output.message("Cancelled."),
    }
    Ok(())
}

/// Search books by title
pub fn search(shelf: &Shelf, keyword: String, view: &mut ShelfView) -> Result<()> {
    let results = shelf.search_by_title(&keyword);
    view.show_search(&keyword, results);
    Ok(())
}

/// Remove every book
pub fn reset(shelf: &mut Shelf, yes: bool, output: &Output) -> Result<()> {
    let confirmed = yes || (output.should_prompt() && confirm("Delete ALL books?")?);
    if !confirmed {
        output.message("Cancelled.");
        return Ok(());
    }

    shelf.clear();
    output.success("Shelf cleared");
    Ok(())
}

/// Parse a book id given on the command line
fn parse_book_id(id: &str) -> Result<BookId> {
    match id.parse() {
        Ok(id) => Ok(id),
        Err(_) => bail!("Invalid book id '{}': expected a number", id),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::output::OutputFormat;
    use crate::view::Screen;
    use shelf_core::render;
    use shelf_core::BookStore;

    fn setup() -> (Shelf, shelf_core::RenderReceiver) {
        let (trigger, receiver) = render::channel();
        (Shelf::new(BookStore::in_memory(), trigger), receiver)
    }

    fn quiet() -> Output {
        Output::new(OutputFormat::Quiet)
    }

    #[test]
    fn test_parse_book_id() {
        assert_eq!(parse_book_id("123").unwrap(), BookId::new(123));
        assert!(parse_book_id("abc").is_err());
        assert!(parse_book_id("").is_err());
    }

    #[test]
    fn test_add_keeps_year_text() {
        let (mut shelf, _receiver) = setup();

        add(
            &mut shelf,
            "Dune".to_string(),
            "Herbert".to_string(),
            "1965".to_string(),
            false,
            &quiet(),
        )
        .unwrap();

        let books = shelf.books();
        assert_eq!(books.len(), 1);
        assert_eq!(books[0].year, Year::Text("1965".to_string()));
    }

    #[test]
    fn test_mark_and_remove_flow() {
        let (mut shelf, receiver) = setup();
        let output = quiet();
        let book = shelf.add_book(NewBook::new("Dune", "Herbert", "1965", false));
        let id = book.id.to_string();

        mark(&mut shelf, id.clone(), true, &output).unwrap();
        assert!(shelf.get(book.id).unwrap().is_completed);

        mark(&mut shelf, id.clone(), false, &output).unwrap();
        assert!(!shelf.get(book.id).unwrap().is_completed);

        // Non-interactive output without --yes declines
        remove(&mut shelf, id.clone(), false, &output).unwrap();
        assert_eq!(shelf.books().len(), 1);

        remove(&mut shelf, id, true, &output).unwrap();
        assert!(shelf.books().is_empty());

        // add, read, unread, remove
        assert_eq!(receiver.pending(), 4);
    }

    #[test]
    fn test_unknown_ids_are_not_errors() {
        let (mut shelf, receiver) = setup();
        let output = quiet();

        mark(&mut shelf, "1".to_string(), true, &output).unwrap();
        remove(&mut shelf, "1".to_string(), true, &output).unwrap();
        assert_eq!(receiver.pending(), 0);

        assert!(show(&shelf, "1".to_string(), &output).is_err());
    }

    #[test]
    fn test_search_shows_results() {
        let (mut shelf, receiver) = setup();
        let output = quiet();
        shelf.add_book(NewBook::new("Dune", "Herbert", "1965", false));
        shelf.add_book(NewBook::new("Emma", "Austen", "1815", false));
        receiver.pending();

        let mut view = ShelfView::new(receiver, &output);
        search(&shelf, "EMM".to_string(), &mut view).unwrap();

        match view.screen() {
            Screen::Search { keyword, shelves } => {
                assert_eq!(keyword, "EMM");
                assert_eq!(shelves.len(), 1);
                assert_eq!(shelves.unread[0].title, "Emma");
            }
            other => panic!("expected search results, got {:?}", other),
        }
    }

    #[test]
    fn test_list_requests_render() {
        let (shelf, receiver) = setup();

        list(&shelf).unwrap();
        assert_eq!(receiver.pending(), 1);
    }

    #[test]
    fn test_reset() {
        let (mut shelf, _receiver) = setup();
        let output = quiet();
        shelf.add_book(NewBook::new("Dune", "Herbert", "1965", false));

        reset(&mut shelf, false, &output).unwrap();
        assert_eq!(shelf.books().len(), 1);

        reset(&mut shelf, true, &output).unwrap();
        assert!(shelf.books().is_empty());
    }
}
