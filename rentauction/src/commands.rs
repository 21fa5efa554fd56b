use super::BatchFiles;
use clap::{Subcommand, ValueEnum};

mod run;
mod solve;

pub use run::{Terminal, TerminalError};
pub use solve::{BatchBids, BatchError, BatchInput};

#[derive(Subcommand)]
pub enum Commands {
    /// Settle an auction whose bids are given in a JSON file
    Solve {
        #[command(flatten)]
        files: BatchFiles,

        /// How to write the report
        #[arg(short, long, default_value = "json")]
        format: ReportFormat,
    },

    /// Run an auction interactively, with bidders taking turns at this terminal
    Run {
        /// Do not clear the screen between bidders
        #[arg(long)]
        no_clear: bool,
    },
}

// The output formats available to the `solve` subcommand
#[derive(Clone, Copy, ValueEnum)]
pub enum ReportFormat {
    Json,
    Text,
}
