//! Error types for estimo operations

use thiserror::Error;

/// Rejected estimation requests.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum RequestError {
    #[error("Invalid request: no technologies and no requirements to estimate")]
    Empty,

    #[error("Invalid request field {field}: {reason}")]
    InvalidField { field: String, reason: String },
}

/// Knowledge base snapshots that fail validation at load time.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum KnowledgeBaseError {
    #[error("Technology {technology} has base_complexity {value}, expected 0-10")]
    ComplexityOutOfRange { technology: String, value: f64 },

    #[error("Synergy multiplier {technology}->{partner} is {value}, expected > 0")]
    NonPositiveMultiplier {
        technology: String,
        partner: String,
        value: f64,
    },

    #[error("Technology {technology} accumulates synergy discount {total_discount}, at most 1.0 allowed")]
    SynergyBudgetExceeded {
        technology: String,
        total_discount: f64,
    },

    #[error("Technology key must not be empty")]
    EmptyTechnologyKey,

    #[error("Technology {technology} is declared more than once")]
    DuplicateTechnology { technology: String },

    #[error("Invalid history entry {index}: {reason}")]
    InvalidHistory { index: usize, reason: String },

    #[error("Failed to parse knowledge base: {reason}")]
    Parse { reason: String },

    #[error("Failed to read knowledge base {path}: {reason}")]
    Io { path: String, reason: String },
}

/// Configuration errors.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Invalid value for {field}: {value} - {reason}")]
    InvalidValue {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Failed to read config {path}: {reason}")]
    Io { path: String, reason: String },

    #[error("Failed to parse config: {reason}")]
    Parse { reason: String },
}

/// Master error type for all estimo errors.
#[derive(Debug, Clone, Error)]
pub enum EstimoError {
    #[error("Request error: {0}")]
    Request(#[from] RequestError),

    #[error("Knowledge base error: {0}")]
    KnowledgeBase(#[from] KnowledgeBaseError),

    #[error("Config error: {0}")]
    Config(#[from] ConfigError),
}

/// Result type alias for estimo operations.
pub type EstimoResult<T> = Result<T, EstimoError>;

// =============================================================================
// TESTS
// =============================================================================
