//! Shelf display
//!
//! `ShelfView` is the one subscriber of the shelf's render signals. It
//! never receives books with a signal: when a signal has arrived it reads
//! the collection back from storage and draws both lists. Search results
//! are drawn directly and stay on screen only until the next redraw.

use shelf_core::query::partition;
use shelf_core::{Book, RenderReceiver, Shelf, Shelves};

use crate::output::Output;

/// What is currently on screen
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Screen {
    /// Nothing drawn yet
    Blank,
    /// Both partitions of the full collection
    Shelves(Shelves),
    /// Search results, split into unread and read
    Search { keyword: String, shelves: Shelves },
}

/// Render consumer for a shelf
pub struct ShelfView<'a> {
    receiver: RenderReceiver,
    output: &'a Output,
    screen: Screen,
}

impl<'a> ShelfView<'a> {
    pub fn new(receiver: RenderReceiver, output: &'a Output) -> Self {
        Self {
            receiver,
            output,
            screen: Screen::Blank,
        }
    }

    #[cfg(test)]
    pub fn screen(&self) -> &Screen {
        &self.screen
    }

    /// Redraw from storage if any change was announced
    ///
    /// Returns whether a redraw happened. A redraw always shows the full
    /// collection, replacing search results.
    pub fn refresh(&mut self, shelf: &Shelf) -> bool {
        if self.receiver.pending() == 0 {
            return false;
        }

        let shelves = shelf.shelves();
        self.output.print_shelves(&shelves);
        self.screen = Screen::Shelves(shelves);
        true
    }

    /// Draw search results in place of the shelves
    pub fn show_search(&mut self, keyword: &str, results: Vec<Book>) {
        let shelves = partition(&results);
        self.output.print_search_results(keyword, &shelves);
        self.screen = Screen::Search {
            keyword: keyword.to_string(),
            shelves,
        };
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::output::OutputFormat;
    use shelf_core::render;
    use shelf_core::{BookStore, NewBook};

    fn setup() -> (Shelf, RenderReceiver) {
        let (trigger, receiver) = render::channel();
        (Shelf::new(BookStore::in_memory(), trigger), receiver)
    }

    #[test]
    fn test_no_redraw_without_signal() {
        let output = Output::new(OutputFormat::Quiet);
        let (shelf, receiver) = setup();
        let mut view = ShelfView::new(receiver, &output);

        assert!(!view.refresh(&shelf));
        assert_eq!(view.screen(), &Screen::Blank);
    }

    #[test]
    fn test_redraw_reads_stored_collection() {
        let output = Output::new(OutputFormat::Quiet);
        let (mut shelf, receiver) = setup();
        let mut view = ShelfView::new(receiver, &output);

        let dune = shelf.add_book(NewBook::new("Dune", "Herbert", "1965", false));
        let emma = shelf.add_book(NewBook::new("Emma", "Austen", "1815", true));

        assert!(view.refresh(&shelf));
        assert_eq!(
            view.screen(),
            &Screen::Shelves(Shelves {
                unread: vec![dune],
                read: vec![emma],
            })
        );

        // Signals were consumed by the first redraw
        assert!(!view.refresh(&shelf));
    }

    #[test]
    fn test_mutation_replaces_search_results() {
        let output = Output::new(OutputFormat::Quiet);
        let (mut shelf, receiver) = setup();
        let mut view = ShelfView::new(receiver, &output);

        let dune = shelf.add_book(NewBook::new("Dune", "Herbert", "1965", false));
        shelf.add_book(NewBook::new("Emma", "Austen", "1815", false));
        view.refresh(&shelf);

        let results = shelf.search_by_title("dun");
        view.show_search("dun", results);
        assert!(matches!(view.screen(), Screen::Search { shelves, .. } if shelves.len() == 1));

        // Searching alone does not trigger a redraw
        assert!(!view.refresh(&shelf));

        shelf.mark_as_read(dune.id);
        assert!(view.refresh(&shelf));
        match view.screen() {
            Screen::Shelves(shelves) => {
                assert_eq!(shelves.len(), 2);
                assert_eq!(shelves.read.len(), 1);
            }
            other => panic!("expected full shelves, got {:?}", other),
        }
    }

    #[test]
    fn test_search_results_are_split_by_state() {
        let output = Output::new(OutputFormat::Quiet);
        let (mut shelf, receiver) = setup();
        let mut view = ShelfView::new(receiver, &output);

        let dune = shelf.add_book(NewBook::new("Dune", "Herbert", "1965", false));
        let messiah = shelf.add_book(NewBook::new("Dune Messiah", "Herbert", "1969", true));
        shelf.add_book(NewBook::new("Emma", "Austen", "1815", true));
        view.refresh(&shelf);

        let results = shelf.search_by_title("dune");
        view.show_search("dune", results);

        assert_eq!(
            view.screen(),
            &Screen::Search {
                keyword: "dune".to_string(),
                shelves: Shelves {
                    unread: vec![dune],
                    read: vec![messiah],
                },
            }
        );
    }

    #[test]
    fn test_noop_mutation_keeps_screen() {
        let output = Output::new(OutputFormat::Quiet);
        let (mut shelf, receiver) = setup();
        let mut view = ShelfView::new(receiver, &output);

        let dune = shelf.add_book(NewBook::new("Dune", "Herbert", "1965", false));
        view.refresh(&shelf);
        view.show_search("x", Vec::new());

        shelf.remove_book(dune.id, false);
        shelf.mark_as_read(shelf_core::BookId::new(1));

        assert!(!view.refresh(&shelf));
        assert!(matches!(view.screen(), Screen::Search { .. }));
    }
}
