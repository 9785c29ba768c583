//! Read-only queries over a loaded collection
//!
//! All lookups are linear scans in collection order; the first match wins.

use crate::models::{Book, BookId, Shelves};

/// Find the first book with the given id
pub fn find_by_id(books: &[Book], id: BookId) -> Option<&Book> {
    books.iter().find(|book| book.id == id)
}

/// Position of the first book with the given id
pub fn index_of(books: &[Book], id: BookId) -> Option<usize> {
    books.iter().position(|book| book.id == id)
}

/// Books whose title contains `keyword`, ignoring case
///
/// An empty keyword matches every book. Relative order is preserved.
pub fn search_by_title(books: &[Book], keyword: &str) -> Vec<Book> {
    let keyword = keyword.to_lowercase();
    books
        .iter()
        .filter(|book| book.title.to_lowercase().contains(&keyword))
        .cloned()
        .collect()
}

/// Split a collection into unread and read books
pub fn partition(books: &[Book]) -> Shelves {
    let (read, unread): (Vec<Book>, Vec<Book>) = books.iter().cloned().partition(|book| book.is_completed);
    Shelves { unread, read }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Year;

    fn book(id: i64, title: &str, is_completed: bool) -> Book {
        Book {
            id: BookId::new(id),
            title: title.to_string(),
            author: "Author".to_string(),
            year: Year::Number(2000),
            is_completed,
        }
    }

    fn sample() -> Vec<Book> {
        vec![
            book(1, "Dune", false),
            book(2, "Dune Messiah", true),
            book(3, "Neuromancer", false),
            book(4, "The Left Hand of Darkness", true),
        ]
    }

    #[test]
    fn test_find_by_id() {
        let books = sample();
        assert_eq!(find_by_id(&books, BookId::new(3)).unwrap().title, "Neuromancer");
        assert!(find_by_id(&books, BookId::new(99)).is_none());
    }

    #[test]
    fn test_find_by_id_first_match_wins() {
        let mut books = sample();
        books.push(book(1, "Duplicate", true));

        assert_eq!(find_by_id(&books, BookId::new(1)).unwrap().title, "Dune");
        assert_eq!(index_of(&books, BookId::new(1)), Some(0));
    }

    #[test]
    fn test_index_of() {
        let books = sample();
        assert_eq!(index_of(&books, BookId::new(4)), Some(3));
        assert_eq!(index_of(&books, BookId::new(99)), None);
        assert_eq!(index_of(&[], BookId::new(1)), None);
    }

    #[test]
    fn test_search_empty_keyword_matches_all() {
        let books = sample();
        assert_eq!(search_by_title(&books, ""), books);
    }

    #[test]
    fn test_search_is_case_insensitive() {
        let books = sample();

        let results = search_by_title(&books, "DUN");
        let ids: Vec<_> = results.iter().map(|b| b.id.value()).collect();
        assert_eq!(ids, vec![1, 2]);

        let results = search_by_title(&books, "darK");
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].id, BookId::new(4));
    }

    #[test]
    fn test_search_matches_exact_subsequence() {
        let books = sample();
        let keyword = "an";

        let expected: Vec<Book> = books
            .iter()
            .filter(|b| b.title.to_lowercase().contains(keyword))
            .cloned()
            .collect();

        assert_eq!(search_by_title(&books, keyword), expected);
        assert!(search_by_title(&books, "zzz").is_empty());
    }

    #[test]
    fn test_partition_is_disjoint_and_complete() {
        let books = sample();
        let shelves = partition(&books);

        assert_eq!(shelves.len(), books.len());
        assert!(shelves.unread.iter().all(|b| !b.is_completed));
        assert!(shelves.read.iter().all(|b| b.is_completed));

        for book in &books {
            let in_unread = shelves.unread.contains(book);
            let in_read = shelves.read.contains(book);
            assert!(in_unread ^ in_read, "book {} must be in exactly one list", book.id);
        }
    }

    #[test]
    fn test_partition_preserves_order() {
        let shelves = partition(&sample());

        let unread: Vec<_> = shelves.unread.iter().map(|b| b.id.value()).collect();
        let read: Vec<_> = shelves.read.iter().map(|b| b.id.value()).collect();
        assert_eq!(unread, vec![1, 3]);
        assert_eq!(read, vec![2, 4]);
    }

    #[test]
    fn test_partition_empty() {
        assert!(partition(&[]).is_empty());
    }
}
