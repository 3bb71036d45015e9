//! `validate`: run the setup checks against a snapshot.

use crate::error::CliError;
use crate::io_utils;
use seatread_engine::validation;
use std::io::Write;

/// Prints the table summary as JSON, or fails with the first violated check.
pub fn handle_validate_command(input: &str, out: &mut dyn Write) -> Result<(), CliError> {
    let text = io_utils::read_text(input).map_err(CliError::InvalidInput)?;
    let snapshot = io_utils::parse_snapshot(&text)?;
    let summary = validation::summarize(&snapshot.players)?;
    let json = serde_json::to_string_pretty(&summary).map_err(std::io::Error::other)?;
    writeln!(out, "{}", json)?;
    Ok(())
}
