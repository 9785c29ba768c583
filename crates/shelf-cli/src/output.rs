//! Output formatting for CLI
//!
//! Provides consistent output formatting across all commands:
//! - Human-readable default output
//! - JSON output (--json flag)
//! - Quiet mode for scripting (--quiet flag)

use shelf_core::{Book, Shelves};

/// Output format options
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    /// Human-readable output (default)
    Human,
    /// JSON output
    Json,
    /// Quiet mode - minimal output
    Quiet,
}

impl OutputFormat {
    /// Create format from CLI flags
    pub fn from_flags(json: bool, quiet: bool) -> Self {
        if quiet {
            OutputFormat::Quiet
        } else if json {
            OutputFormat::Json
        } else {
            OutputFormat::Human
        }
    }
}

/// Output helper for consistent formatting
pub struct Output {
    /// The output format
    pub format: OutputFormat,
}

impl Output {
    pub fn new(format: OutputFormat) -> Self {
        Self { format }
    }

    /// Check if output is in quiet mode
    pub fn is_quiet(&self) -> bool {
        matches!(self.format, OutputFormat::Quiet)
    }

    /// Print a single book
    pub fn print_book(&self, book: &Book) {
        match self.format {
            OutputFormat::Human => {
                println!("ID:      {}", book.id);
                println!("Title:   {}", book.title);
                println!("Author:  {}", book.author);
                println!("Year:    {}", book.year);
                println!("Status:  {}", status_label(book));
            }
            OutputFormat::Json => print_json(book),
            OutputFormat::Quiet => println!("{}", book.id),
        }
    }

    /// Print both shelves, unread first
    pub fn print_shelves(&self, shelves: &Shelves) {
        match self.format {
            OutputFormat::Human => {
                println!("── Unread ({}) ──", shelves.unread.len());
                print_rows(&shelves.unread, "No unread books.");
                println!();
                println!("── Read ({}) ──", shelves.read.len());
                print_rows(&shelves.read, "No read books.");
                println!("\n{} book(s)", shelves.len());
            }
            OutputFormat::Json => print_json(shelves),
            OutputFormat::Quiet => {
                for book in shelves.unread.iter().chain(&shelves.read) {
                    println!("{}", book.id);
                }
            }
        }
    }

    /// Print search results, split into unread and read like the shelves
    pub fn print_search_results(&self, keyword: &str, results: &Shelves) {
        match self.format {
            OutputFormat::Human => {
                println!("Search: \"{}\"", keyword);
                println!();
                println!("── Unread ({}) ──", results.unread.len());
                print_rows(&results.unread, "No unread matches.");
                println!();
                println!("── Read ({}) ──", results.read.len());
                print_rows(&results.read, "No read matches.");
                println!("\n{} match(es)", results.len());
            }
            OutputFormat::Json => print_json(&serde_json::json!({
                "keyword": keyword,
                "unread": results.unread,
                "read": results.read,
            })),
            OutputFormat::Quiet => {
                for book in results.unread.iter().chain(&results.read) {
                    println!("{}", book.id);
                }
            }
        }
    }

    /// Print a success message
    pub fn success(&self, message: &str) {
        match self.format {
            OutputFormat::Human => println!("✓ {}", message),
            OutputFormat::Json => {
                println!(
                    "{}",
                    serde_json::json!({"status": "success", "message": message})
                );
            }
            OutputFormat::Quiet => {}
        }
    }

    /// Check if we should prompt for confirmation
    pub fn should_prompt(&self) -> bool {
        self.format == OutputFormat::Human
    }

    /// Print an informational message
    pub fn message(&self, msg: &str) {
        match self.format {
            OutputFormat::Human => println!("{}", msg),
            OutputFormat::Json => {
                println!("{}", serde_json::json!({"message": msg}));
            }
            OutputFormat::Quiet => {}
        }
    }
}

fn status_label(book: &Book) -> &'static str {
    if book.is_completed {
        "read"
    } else {
        "unread"
    }
}

fn print_rows(books: &[Book], empty: &str) {
    if books.is_empty() {
        println!("{}", empty);
        return;
    }
    for book in books {
        println!("{}", format_row(book));
    }
}

/// One line per book: id, title, author, year
fn format_row(book: &Book) -> String {
    format!(
        "{} | {} | {} | {}",
        book.id,
        truncate(&book.title, 35),
        truncate(&book.author, 25),
        book.year
    )
}

fn print_json<T: serde::Serialize + ?Sized>(value: &T) {
    match serde_json::to_string_pretty(value) {
        Ok(json) => println!("{}", json),
        Err(e) => eprintln!("Failed to encode output: {}", e),
    }
}

/// Truncate a string to max characters, adding "..." if truncated
fn truncate(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max_len.saturating_sub(3)).collect();
        format!("{}...", kept)
    }
}
