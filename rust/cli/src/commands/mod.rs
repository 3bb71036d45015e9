//! One module per subcommand.
//!
//! Each exposes `handle_<name>_command(...) -> Result<(), CliError>` and
//! writes only to the streams it is handed.

mod cfg;
mod positions;
mod prompt;
mod validate;

pub use cfg::handle_cfg_command;
pub use positions::handle_positions_command;
pub use prompt::handle_prompt_command;
pub use validate::handle_validate_command;
