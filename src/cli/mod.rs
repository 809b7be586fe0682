//! Command-line interface: argument parsing, report command and output rendering.

pub mod commands;
pub mod display;
pub mod types;

pub use types::Cli;

use crate::domain::errors::DomainError;

/// Print a user-facing message for a failed run.
///
/// Unreadable input files get the short message operators expect; everything
/// else prints the full error chain.
pub fn handle_error(err: &anyhow::Error, json: bool) {
    let message = match err.downcast_ref::<DomainError>() {
        Some(DomainError::SourceRead { path, .. }) => {
            format!("Error reading file {}", path.display())
        }
        _ => format!("Error: {err:#}"),
    };

    if json {
        eprintln!("{}", serde_json::json!({ "error": message }));
    } else {
        eprintln!("{message}");
    }
}
