use commitguard_core::ConfigError;
use commitguard_types::InputError;
use thiserror::Error;

/// Errors surfaced by the engine.
///
/// A denied commit is never an error; it is an `allowed = false` decision.
#[derive(Error, Debug)]
pub enum EngineError {
    #[error("invalid commit facts: {0}")]
    Input(#[from] InputError),

    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("evaluation task failed: {0}")]
    Task(String),
}

/// Result type for engine operations.
pub type Result<T> = std::result::Result<T, EngineError>;
