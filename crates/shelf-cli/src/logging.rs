//! Logging setup
//!
//! Logging is off apart from warnings unless `SHELF_LOG` names a level.
//! Logs go to stderr, or to `log_file` when one is configured.

use std::fs::OpenOptions;
use std::sync::Mutex;

use shelf_core::Config;
use tracing::debug;
use tracing_subscriber::EnvFilter;

/// Default level when `SHELF_LOG` is unset
const DEFAULT_LEVEL: &str = "warn";

/// Install the global tracing subscriber
pub fn init(config: &Config) {
    let log_level = std::env::var("SHELF_LOG").unwrap_or_else(|_| DEFAULT_LEVEL.to_string());
    let env_filter = filter_for(&log_level);

    if let Some(ref log_path) = config.log_file {
        let log_file = match OpenOptions::new().create(true).append(true).open(log_path) {
            Ok(f) => f,
            Err(e) => {
                eprintln!("Warning: Could not open log file {:?}: {}", log_path, e);
                return;
            }
        };

        // Ignore error if already initialized
        let _ = tracing_subscriber::fmt()
            .with_env_filter(env_filter)
            .with_target(false)
            .with_ansi(false)
            .with_writer(Mutex::new(log_file))
            .try_init();
    } else {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(env_filter)
            .with_target(false)
            .with_writer(std::io::stderr)
            .try_init();
    }

    debug!("Logging initialized at level {}", log_level);
}

fn filter_for(level: &str) -> EnvFilter {
    // The binary's own events carry the target `shelf`
    EnvFilter::new(format!("shelf_core={},shelf={}", level, level))
}
