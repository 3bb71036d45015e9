//! # seatread CLI
//!
//! Offline front end for the scene-description engine: print position
//! tables, render a prompt from a saved table snapshot, and check a table
//! before setting it up.
//!
//! ```no_run
//! use std::io;
//! let args = vec!["seatread", "prompt", "--input", "table.json"];
//! let code = seatread_cli::run(args, &mut io::stdout(), &mut io::stderr());
//! assert_eq!(code, 0);
//! ```
//!
//! ## Subcommands
//!
//! - `positions --seats N [--dealer D]`
//! - `prompt --input FILE [--follow-up] [--format text|json]`
//! - `validate --input FILE`
//! - `cfg`

use clap::Parser;
use std::io::Write;

pub mod cli;
mod commands;
pub mod config;
mod error;
pub mod exit_code;
pub mod io_utils;
pub mod ui;

use cli::{Commands, SeatreadCli};
use commands::{
    handle_cfg_command, handle_positions_command, handle_prompt_command, handle_validate_command,
};

pub use error::CliError;

const COMMANDS: &[&str] = &["positions", "prompt", "validate", "cfg"];

/// Parses `args` and runs one subcommand.
///
/// Returns [`exit_code::SUCCESS`] or [`exit_code::ERROR`]. Errors go to
/// `err`, results to `out`.
///
/// ```
/// let mut out = Vec::new();
/// let mut err = Vec::new();
/// let code = seatread_cli::run(
///     ["seatread", "positions", "--seats", "3", "--dealer", "1"],
///     &mut out,
///     &mut err,
/// );
/// assert_eq!(code, 0);
/// assert_eq!(String::from_utf8(out).unwrap(), "Seat 2: SB\nSeat 3: BB\nSeat 1: BTN (dealer)\n");
/// ```
pub fn run<I, S>(args: I, out: &mut dyn Write, err: &mut dyn Write) -> i32
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let argv: Vec<String> = args.into_iter().map(|s| s.as_ref().to_string()).collect();

    let cli = match SeatreadCli::try_parse_from(&argv) {
        Ok(cli) => cli,
        Err(e) => return report_parse_error(e, out, err),
    };

    let result = match cli.cmd {
        Commands::Positions { seats, dealer } => handle_positions_command(seats, dealer, out, err),
        Commands::Prompt {
            input,
            follow_up,
            format,
        } => handle_prompt_command(&input, follow_up, format, out, err),
        Commands::Validate { input } => handle_validate_command(&input, out),
        Commands::Cfg => handle_cfg_command(out),
    };

    match result {
        Ok(()) => exit_code::SUCCESS,
        Err(e) => {
            let _ = ui::write_error(err, &e.to_string());
            exit_code::ERROR
        }
    }
}

fn report_parse_error(e: clap::Error, out: &mut dyn Write, err: &mut dyn Write) -> i32 {
    use clap::error::ErrorKind;

    if matches!(e.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) {
        return match write!(out, "{}", e) {
            Ok(()) => exit_code::SUCCESS,
            Err(_) => exit_code::ERROR,
        };
    }

    let _ = writeln!(err, "{}", e);
    let _ = writeln!(err, "Usage: seatread <command> [options]\n");
    let _ = writeln!(err, "Commands:");
    for c in COMMANDS {
        let _ = writeln!(err, "  {}", c);
    }
    let _ = writeln!(err, "\nFor full help, run: seatread --help");
    exit_code::ERROR
}
