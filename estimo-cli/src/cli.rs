use chrono::NaiveDate;
use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(name = "estimo")]
#[command(about = "Project estimation and team recommendation", long_about = None)]
pub struct Cli {
    /// TOML configuration file (falls back to ESTIMO_CONFIG)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Json, global = true)]
    pub format: OutputFormat,

    /// Emit logs as JSON lines
    #[arg(long, global = true)]
    pub json_logs: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Json,
    Text,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Estimate a project request (JSON file)
    Estimate {
        /// Project request file
        request: PathBuf,

        /// Reference date for deadline risk (defaults to today, UTC)
        #[arg(long)]
        as_of: Option<NaiveDate>,
    },

    /// Rank a roster against required skills (JSON file)
    Match {
        /// Team match request file
        request: PathBuf,
    },

    /// Estimate, staff and price a project
    Plan {
        /// Project request file
        request: PathBuf,

        /// Roster file (JSON array of team members)
        #[arg(long)]
        roster: PathBuf,

        /// Reference date for deadline risk (defaults to today, UTC)
        #[arg(long)]
        as_of: Option<NaiveDate>,
    },

    /// Validate a knowledge base document and report its calibration
    CheckKb {
        /// Knowledge base file (JSON or TOML); the configured one when omitted
        path: Option<PathBuf>,
    },
}
