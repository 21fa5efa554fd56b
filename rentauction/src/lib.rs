use clap::Parser;
use std::path::PathBuf;

mod config;
pub use self::config::{AppConfig, TerminalConfig};

mod io;
pub use io::*;

mod commands;
pub use commands::*;

mod render;
pub use render::*;

// The top-level arguments: an optional config file and the subcommand to execute
#[derive(Parser)]
#[command(version, about, long_about = None)]
pub struct BaseArgs {
    /// Path to a TOML configuration file
    #[arg(short, long, env = "RENT_CONFIG", global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

impl BaseArgs {
    pub fn evaluate(self) -> anyhow::Result<()> {
        let mut config = AppConfig::load(self.config.as_deref())?;

        match self.command {
            Commands::Solve { files, format } => {
                let report = files.read_batch()?.solve(config.report)?;
                files.write_report(&report, format, &config.report)?;
            }
            Commands::Run { no_clear } => {
                if no_clear {
                    config.terminal.clear_screen = false;
                }
                let stdin = std::io::stdin().lock();
                let stdout = std::io::stdout().lock();
                Terminal::new(stdin, stdout, config).session()?;
            }
        }

        Ok(())
    }
}
