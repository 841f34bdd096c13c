use thiserror::Error;

/// Errors raised while loading or compiling the engine configuration.
///
/// All of them are fatal at startup: an engine is never built from a partially
/// valid configuration.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("invalid pattern in {table}: `{pattern}`: {reason}")]
    InvalidPattern {
        table: &'static str,
        pattern: String,
        reason: String,
    },

    #[error("{field} must be within [0, 1], got {value}")]
    ThresholdOutOfRange { field: String, value: f64 },

    #[error("{field} must be a non-negative finite number, got {value}")]
    InvalidWeight { field: String, value: f64 },

    #[error("duplicate compliance template for domain {0}")]
    DuplicateTemplate(commitguard_types::Domain),

    #[error("{0} must not be empty")]
    EmptyTable(&'static str),

    #[error("tie-break priority must list every domain exactly once")]
    InvalidPriority,

    #[error("level thresholds must satisfy 0 < medium < high < critical <= 100")]
    InvalidLevelThresholds,

    #[error("size thresholds must satisfy medium_lines <= large_lines")]
    InvalidSizeThresholds,

    #[error("{table} references `{marker}`, which is not a recognized compliance marker")]
    UnknownMarker { table: String, marker: String },

    #[error("failed to read config {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config: {0}")]
    Parse(#[from] serde_yaml::Error),

    #[error("failed to serialize config: {0}")]
    Serialize(String),
}

/// Result type for configuration handling.
pub type Result<T> = std::result::Result<T, ConfigError>;
