//! Shared components for CLI commands
//!
//! Logging setup and captured-message handling used by both subcommands.

use crate::{Error, Result};
use std::path::Path;
use tracing::debug;

/// Set up structured logging at the requested level
pub fn setup_logging(log_level: &str) -> Result<()> {
    use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("lis_bridge={log_level}")));

    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_target(false)
                .with_level(true)
                .with_writer(std::io::stderr)
                .compact(),
        )
        .init();

    debug!("Logging initialized at level: {}", log_level);
    Ok(())
}

/// Read a captured message file and normalize its line endings to `\r`.
///
/// Captures saved from terminals or editors commonly arrive with `\n` or
/// `\r\n` endings; the wire contract itself delimits records with `\r`.
pub fn read_message_file(path: &Path) -> Result<String> {
    let content = std::fs::read_to_string(path)
        .map_err(|e| Error::io(format!("Failed to read message file {}", path.display()), e))?;
    Ok(normalize_line_endings(&content))
}

fn normalize_line_endings(content: &str) -> String {
    content.replace("\r\n", "\r").replace('\n', "\r")
}
