use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "weather-odds",
    version,
    about = "Historical weather odds for a place and calendar day"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Path to config.yaml
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Increase log verbosity (-v for debug, -vv for trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Run the HTTP service (default)
    Serve,
    /// Analyze one place and date and print the result
    Analyze {
        /// Place name, e.g. "Lisbon"
        location: String,
        /// Target date as YYYY-MM-DD
        date: String,
        /// Output format
        #[arg(short, long, value_enum, default_value_t = OutputFormat::Json)]
        format: OutputFormat,
    },
    /// Interactive config setup
    Init,
    /// Validate config and test the geocoding connection
    Check,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Json,
    Csv,
}

impl Cli {
    /// Log filter implied by the command and `-v` count.
    pub fn log_filter(&self) -> &'static str {
        match self.verbose {
            0 => match self.command {
                None | Some(Commands::Serve) => "info",
                _ => "warn",
            },
            1 => "debug",
            _ => "trace",
        }
    }
}
