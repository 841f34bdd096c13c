use thiserror::Error;

/// Malformed [`CommitFacts`](crate::CommitFacts) rejected before evaluation.
///
/// A malformed input must never be evaluated, since defaulting a missing field
/// could turn into a false allow.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum InputError {
    #[error("commit sha is empty")]
    EmptySha,

    #[error("changed file at index {index} has an empty path")]
    EmptyPath { index: usize },

    #[error("malformed commit facts: {0}")]
    Malformed(String),
}

/// Result type for input handling.
pub type Result<T> = std::result::Result<T, InputError>;
