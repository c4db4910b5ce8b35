//! estimo CLI
//!
//! Thin driver over the estimation engine: reads JSON requests, applies the
//! optional TOML configuration and prints JSON or plain-text results.

pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
pub mod logging;

pub use cli::{Cli, Commands, OutputFormat};
pub use commands::{build_engine, run, KnowledgeBaseSummary};
pub use config::CliConfig;
pub use error::CliError;
