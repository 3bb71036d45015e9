//! `cfg`: resolved configuration with the source of every value.
//!
//! ```json
//! {
//!   "play_style": { "value": "...", "source": "default" },
//!   "prompt_log": { "value": null, "source": "default" }
//! }
//! ```

use crate::config;
use crate::error::CliError;
use std::io::Write;

pub fn handle_cfg_command(out: &mut dyn Write) -> Result<(), CliError> {
    let config::ConfigResolved { config, sources } = config::load_with_sources()?;
    let display = serde_json::json!({
        "play_style": {
            "value": config.play_style,
            "source": sources.play_style,
        },
        "prompt_log": {
            "value": config.prompt_log,
            "source": sources.prompt_log,
        },
    });
    let json_str = serde_json::to_string_pretty(&display).map_err(std::io::Error::other)?;
    writeln!(out, "{}", json_str)?;
    Ok(())
}
