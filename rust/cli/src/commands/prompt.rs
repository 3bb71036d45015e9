//! `prompt`: render a scene description from a snapshot file.

use crate::cli::OutputFormat;
use crate::config;
use crate::error::CliError;
use crate::io_utils;
use crate::ui;
use seatread_engine::logger::{PromptLogger, PromptRecord};
use seatread_engine::prompt::{PromptPhase, SceneBuilder};
use seatread_engine::session::Advice;
use std::io::Write;

/// Renders the description for the snapshot at `input`.
///
/// Without `follow_up` the first-prompt form is rendered and the viewer's
/// hole cards are required. When a prompt log is configured the result is
/// appended to it; a failed write is reported as a warning only.
pub fn handle_prompt_command(
    input: &str,
    follow_up: bool,
    format: OutputFormat,
    out: &mut dyn Write,
    err: &mut dyn Write,
) -> Result<(), CliError> {
    let cfg = config::load()?;
    let text = io_utils::read_text(input).map_err(CliError::InvalidInput)?;
    let snapshot = io_utils::parse_snapshot(&text)?;

    let phase = if follow_up {
        PromptPhase::PromptsIssued
    } else {
        PromptPhase::AwaitingFirstPrompt
    };
    let scene = SceneBuilder::with_play_style(cfg.play_style.as_str()).render(
        &snapshot.players,
        &snapshot.cards,
        phase,
    )?;
    let advice = Advice {
        prompt: scene.text,
        stage: scene.stage,
        first_prompt: phase.is_first(),
    };

    if let Some(path) = &cfg.prompt_log {
        let logged = PromptLogger::open(path)
            .and_then(|mut logger| logger.write(&PromptRecord::from_advice(None, &advice)));
        if let Err(e) = logged {
            ui::display_warning(
                err,
                &format!("could not append to prompt log {}: {}", path.display(), e),
            )?;
        }
    }

    match format {
        OutputFormat::Text => writeln!(out, "{}", advice.prompt)?,
        OutputFormat::Json => {
            let json = serde_json::to_string_pretty(&advice).map_err(std::io::Error::other)?;
            writeln!(out, "{}", json)?;
        }
    }
    Ok(())
}
