use clap::{Parser, Subcommand, ValueEnum};

#[derive(Parser, Debug)]
#[command(
    name = "seatread",
    version,
    about = "Describe a Hold'em table from one seat's point of view"
)]
pub struct SeatreadCli {
    #[command(subcommand)]
    pub cmd: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Show seat order and position labels for a table size
    #[command(alias = "pos")]
    Positions {
        #[arg(long)]
        seats: usize,
        /// 1-based seat holding the button
        #[arg(long, default_value_t = 1)]
        dealer: usize,
    },
    /// Render a scene description from a table snapshot
    Prompt {
        /// JSON snapshot `{players, cards}`, or `-` for stdin
        #[arg(long)]
        input: String,
        /// Render the mid-hand form without header and closing questions
        #[arg(long)]
        follow_up: bool,
        #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,
    },
    /// Run the setup checks on a snapshot and print its summary
    Validate {
        #[arg(long)]
        input: String,
    },
    /// Show resolved configuration and where each value came from
    Cfg,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}
