//! Error types for the CLI.

use estimo_core::{ConfigError, EstimoError, KnowledgeBaseError, RequestError};
use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum CliError {
    #[error("Failed to read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Failed to parse {}: {source}", path.display())]
    Input {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("Failed to write output: {0}")]
    Output(#[from] serde_json::Error),
    #[error("Failed to initialize logging: {0}")]
    Logging(String),
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    KnowledgeBase(#[from] KnowledgeBaseError),
    #[error(transparent)]
    Engine(#[from] EstimoError),
}

impl CliError {
    /// 2 for bad input the caller can fix, 1 for everything else.
    pub fn exit_code(&self) -> u8 {
        match self {
            CliError::Input { .. } | CliError::Engine(EstimoError::Request(_)) => 2,
            _ => 1,
        }
    }
}

impl From<RequestError> for CliError {
    fn from(err: RequestError) -> Self {
        CliError::Engine(err.into())
    }
}
