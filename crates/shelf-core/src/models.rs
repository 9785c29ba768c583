//! Data models for shelf
//!
//! Defines the book record and the two read-state partitions it is
//! displayed in. The serialized field names match the stored JSON blob
//! (`id`, `title`, `author`, `year`, `isCompleted`).

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Opaque, stable identifier of a book
///
/// Stored as a bare JSON integer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BookId(i64);

impl BookId {
    pub fn new(value: i64) -> Self {
        Self(value)
    }

    pub fn value(&self) -> i64 {
        self.0
    }
}

impl fmt::Display for BookId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for BookId {
    type Err = std::num::ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim().parse().map(BookId)
    }
}

/// Publication year
///
/// Older data stores the year as a number, the input form stores it as
/// the raw text that was typed. Both forms are kept as-is.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Year {
    Number(i64),
    Text(String),
}

impl fmt::Display for Year {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Year::Number(n) => write!(f, "{}", n),
            Year::Text(s) => f.write_str(s),
        }
    }
}

impl From<i64> for Year {
    fn from(value: i64) -> Self {
        Year::Number(value)
    }
}

impl From<String> for Year {
    fn from(value: String) -> Self {
        Year::Text(value)
    }
}

impl From<&str> for Year {
    fn from(value: &str) -> Self {
        Year::Text(value.to_string())
    }
}

/// A book on the shelf
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Book {
    /// Unique identifier, never changes after creation
    pub id: BookId,
    pub title: String,
    pub author: String,
    pub year: Year,
    /// Whether the book has been read
    pub is_completed: bool,
}

impl Book {
    /// Build a record from raw input and a freshly generated id
    pub fn from_input(id: BookId, input: NewBook) -> Self {
        Self {
            id,
            title: input.title,
            author: input.author,
            year: input.year,
            is_completed: input.is_completed,
        }
    }
}

/// Raw field values for a book that does not exist yet
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewBook {
    pub title: String,
    pub author: String,
    pub year: Year,
    pub is_completed: bool,
}

impl NewBook {
    pub fn new(
        title: impl Into<String>,
        author: impl Into<String>,
        year: impl Into<Year>,
        is_completed: bool,
    ) -> Self {
        Self {
            title: title.into(),
            author: author.into(),
            year: year.into(),
            is_completed,
        }
    }
}

/// The collection split by read state
///
/// `unread` and `read` are disjoint and together hold every book of the
/// collection they were built from, each in collection order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Shelves {
    pub unread: Vec<Book>,
    pub read: Vec<Book>,
}

impl Shelves {
    /// Total number of books across both partitions
    pub fn len(&self) -> usize {
        self.unread.len() + self.read.len()
    }

    pub fn is_empty(&self) -> bool {
        self.unread.is_empty() && self.read.is_empty()
    }
}
