//! Book id generation
//!
//! Ids are millisecond timestamps, bumped forward when the clock has not
//! advanced past an id that is already in use. Two books added within the
//! same millisecond therefore still get distinct ids.

use chrono::Utc;

use crate::models::{Book, BookId};

/// Source of the current time in milliseconds
pub type Clock = fn() -> i64;

fn system_clock() -> i64 {
    Utc::now().timestamp_millis()
}

/// Generates unique, increasing book ids
#[derive(Debug, Clone)]
pub struct IdGenerator {
    clock: Clock,
    last: Option<i64>,
}

impl Default for IdGenerator {
    fn default() -> Self {
        Self::new()
    }
}

impl IdGenerator {
    /// Generator backed by the system clock
    pub fn new() -> Self {
        Self::with_clock(system_clock)
    }

    /// Generator backed by a custom clock
    pub fn with_clock(clock: Clock) -> Self {
        Self { clock, last: None }
    }

    /// Next id, guaranteed not to appear in `existing`
    pub fn next(&mut self, existing: &[Book]) -> BookId {
        let mut candidate = (self.clock)();

        if let Some(last) = self.last {
            candidate = candidate.max(last.saturating_add(1));
        }
        if let Some(max) = existing.iter().map(|book| book.id.value()).max() {
            candidate = candidate.max(max.saturating_add(1));
        }

        self.last = Some(candidate);
        BookId::new(candidate)
    }
}
