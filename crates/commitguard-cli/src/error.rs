//! CLI error types

use thiserror::Error;

#[derive(Debug, Error)]
pub enum CliError {
    /// Engine construction or evaluation failed
    #[error("{0}")]
    Engine(#[from] commitguard::EngineError),

    #[error("Configuration error: {0}")]
    Config(#[from] commitguard::ConfigError),

    /// Invalid input
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

/// Result type for CLI operations
pub type CliResult<T> = Result<T, CliError>;
