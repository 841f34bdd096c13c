//! # CommitGuard Core
//!
//! Configuration for the commit compliance pipeline.
//!
//! All weights, thresholds and patterns are process-wide constants held in an
//! explicitly constructed [`EngineConfig`]. Nothing here is global or mutable:
//! a config is compiled once into a [`CompiledConfig`] and passed into every
//! stage, so tests can substitute alternate tables freely.
//!
//! ```rust,no_run
//! use commitguard_core::EngineConfig;
//!
//! let compiled = EngineConfig::default().compile()?;
//! assert!(compiled.is_low_friction("docs/guide.md"));
//! # Ok::<(), commitguard_core::ConfigError>(())
//! ```

#![deny(unsafe_code)]
#![cfg_attr(feature = "strict-docs", warn(missing_docs))]
#![cfg_attr(not(feature = "strict-docs"), allow(missing_docs))]

pub mod compiled;
pub mod config;
pub mod defaults;
pub mod error;

pub use compiled::{CodePattern, CompiledConfig, SecurityPattern, Subject, REGEX_SIZE_LIMIT};
pub use config::{
    AdvisoryConfig, ClassifierConfig, CriticalPath, EngineConfig, LevelThresholds, NamedPattern,
    PolicyConfig, RiskConfig, SignalTables, WeightedPattern,
};
pub use error::{ConfigError, Result};
