//! Status command handler

use anyhow::Result;

use shelf_core::{Config, Shelf};

use crate::output::{Output, OutputFormat};

/// Show where books are stored and how many there are
pub fn show(shelf: &Shelf, config: &Config, output: &Output) -> Result<()> {
    let shelves = shelf.shelves();
    let available = shelf.store().is_available();
    let problem = shelf.store().check().err();

    match output.format {
        OutputFormat::Json => {
            println!(
                "{}",
                serde_json::json!({
                    "storage": {
                        "enabled": config.storage_enabled,
                        "available": available,
                        "key": shelf.store().key(),
                        "path": config.books_path(),
                        "error": problem.as_ref().map(|e| e.to_string()),
                        "suggestion": problem.as_ref().and_then(|e| e.recovery_suggestion()),
                    },
                    "counts": {
                        "total": shelves.len(),
                        "unread": shelves.unread.len(),
                        "read": shelves.read.len()
                    }
                })
            );
        }
        OutputFormat::Quiet => {
            println!("{}", shelves.len());
        }
        OutputFormat::Human => {
            println!("Shelf Status");
            println!("============");
            println!();
            println!("Storage:");
            let status = match (&problem, available) {
                (None, _) => "enabled".to_string(),
                (Some(_), false) => "disabled (nothing is saved)".to_string(),
                (Some(e), true) => format!("error (nothing is saved): {}", e),
            };
            println!("  Status:   {}", status);
            if let Some(hint) = problem.as_ref().and_then(|e| e.recovery_suggestion()) {
                println!("            {}", hint);
            }
            println!("  Key:      {}", shelf.store().key());
            println!("  Location: {}", config.books_path().display());
            println!();
            println!("Contents:");
            println!("  Unread: {}", shelves.unread.len());
            println!("  Read:   {}", shelves.read.len());
            println!("  Total:  {}", shelves.len());
        }
    }

    Ok(())
}
