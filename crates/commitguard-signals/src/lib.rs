//! # CommitGuard Signals
//!
//! The first two pipeline stages:
//!
//! - [`SignalExtractor`]: commit facts to per-domain signal weights
//! - [`DomainClassifier`]: signal weights to a dominant domain, confidence and
//!   compliance template
//!
//! Both are pure functions over a shared, read-only [`CompiledConfig`].
//!
//! [`CompiledConfig`]: commitguard_core::CompiledConfig

#![deny(unsafe_code)]
#![cfg_attr(feature = "strict-docs", warn(missing_docs))]
#![cfg_attr(not(feature = "strict-docs"), allow(missing_docs))]

pub mod classifier;
pub mod extractor;

pub use classifier::DomainClassifier;
pub use extractor::{SignalExtraction, SignalExtractor, SignalHit, SignalSource};
