//! shelf CLI
//!
//! Command-line interface for shelf - a local-first bookshelf manager.
//!
//! Every command that changes the shelf ends with a redraw of both lists
//! (unread and read), read back from storage.

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};

use shelf_core::{Config, Shelf};

mod commands;
mod logging;
mod output;
mod prompt;
mod view;

use output::{Output, OutputFormat};
use view::ShelfView;

#[derive(Parser)]
#[command(name = "shelf")]
#[command(about = "shelf - Local-first bookshelf manager")]
#[command(version)]
#[command(propagate_version = true)]
struct Cli {
    /// Output as JSON
    #[arg(long, global = true)]
    json: bool,

    /// Quiet mode - minimal output
    #[arg(short, long, global = true)]
    quiet: bool,

    /// Use this config file instead of the default
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Add a book
    Add {
        /// Book title
        title: String,
        /// Author
        #[arg(short, long, default_value = "")]
        author: String,
        /// Publication year
        #[arg(short, long, default_value = "")]
        year: String,
        /// Already read
        #[arg(short, long)]
        read: bool,
    },
    /// Show unread and read books (default)
    #[command(alias = "ls")]
    List,
    /// Show book details
    Show {
        /// Book ID
        id: String,
    },
    /// Mark a book as read
    Read {
        /// Book ID
        id: String,
    },
    /// Mark a book as unread
    Unread {
        /// Book ID
        id: String,
    },
    /// Remove a book
    #[command(alias = "rm")]
    Remove {
        /// Book ID
        id: String,
        /// Skip the confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },
    /// Search books by title
    Search {
        /// Text the title must contain (case-insensitive)
        #[arg(default_value = "")]
        keyword: String,
    },
    /// Remove all books
    Reset {
        /// Skip the confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },
    /// Show storage location and book counts
    Status,
    /// Show or set configuration
    Config {
        #[command(subcommand)]
        command: Option<ConfigCommands>,
    },
}

#[derive(Subcommand, Clone)]
enum ConfigCommands {
    /// Show current configuration
    Show,
    /// Set a configuration value
    Set {
        /// Configuration key (data_dir, storage_key, storage_enabled, log_file)
        key: String,
        /// Configuration value
        value: String,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let output = Output::new(OutputFormat::from_flags(cli.json, cli.quiet));

    // Config commands don't need the shelf
    if let Some(Commands::Config { command }) = &cli.command {
        return handle_config_command(command.clone(), cli.config.as_ref(), &output);
    }

    let config = Config::load_with_cli_override(cli.config.as_ref())?;
    logging::init(&config);

    let (mut shelf, receiver) = Shelf::open_with_config(&config);
    if let Err(e) = shelf.store().check() {
        if !output.is_quiet() {
            eprintln!("⚠ {}. Changes will not be saved.", e);
            if let Some(hint) = e.recovery_suggestion() {
                eprintln!("  {}", hint);
            }
        }
    }

    let mut view = ShelfView::new(receiver, &output);

    let result = match cli.command.unwrap_or(Commands::List) {
        Commands::Add {
            title,
            author,
            year,
            read,
        } => commands::book::add(&mut shelf, title, author, year, read, &output),
        Commands::List => commands::book::list(&shelf),
        Commands::Show { id } => commands::book::show(&shelf, id, &output),
        Commands::Read { id } => commands::book::mark(&mut shelf, id, true, &output),
        Commands::Unread { id } => commands::book::mark(&mut shelf, id, false, &output),
        Commands::Remove { id, yes } => commands::book::remove(&mut shelf, id, yes, &output),
        Commands::Search { keyword } => commands::book::search(&shelf, keyword, &mut view),
        Commands::Reset { yes } => commands::book::reset(&mut shelf, yes, &output),
        Commands::Status => commands::status::show(&shelf, &config, &output),
        Commands::Config { .. } => unreachable!(), // Handled above
    };

    // Draw whatever the command changed
    if result.is_ok() {
        view.refresh(&shelf);
    }

    result
}

fn handle_config_command(
    command: Option<ConfigCommands>,
    config_path: Option<&PathBuf>,
    output: &Output,
) -> Result<()> {
    match command {
        Some(ConfigCommands::Show) | None => commands::config::show(config_path, output),
        Some(ConfigCommands::Set { key, value }) => {
            commands::config::set(key, value, config_path, output)
        }
    }
}
