//! UI helper functions for terminal output formatting.

use std::io::Write;

use handsim_engine::cards::CardId;

pub fn write_error(err: &mut dyn Write, msg: &str) -> std::io::Result<()> {
    writeln!(err, "Error: {}", msg)
}

/// Display a warning message to stderr with "WARNING:" prefix
pub fn display_warning(err: &mut dyn Write, message: &str) -> std::io::Result<()> {
    writeln!(err, "WARNING: {}", message)
}

/// Warn once about deck cards that filter cards can never match.
pub fn warn_missing_metadata(err: &mut dyn Write, missing: &[CardId]) -> std::io::Result<()> {
    if missing.is_empty() {
        return Ok(());
    }
    let ids: Vec<&str> = missing.iter().map(CardId::as_str).collect();
    display_warning(
        err,
        &format!(
            "{} deck card(s) have no metadata and never match filter cards: {}",
            missing.len(),
            ids.join(", ")
        ),
    )
}
