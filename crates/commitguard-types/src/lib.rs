//! # CommitGuard Types
//!
//! Data model shared by every stage of the commit compliance pipeline.
//!
//! ## Overview
//!
//! A single evaluation flows strictly forward:
//!
//! 1. [`CommitFacts`]: immutable input describing one proposed change
//! 2. [`SignalVector`]: per-domain signal weights extracted from the facts
//! 3. [`DomainClassification`]: dominant [`Domain`], confidence and template
//! 4. [`RiskAssessment`]: clamped 0-100 score and [`RiskLevel`]
//! 5. [`PolicyDecision`]: allow/deny with reasons, metadata and reviewers
//!
//! Every derived value is built fresh per evaluation and never mutated after
//! construction.

#![deny(unsafe_code)]
#![cfg_attr(feature = "strict-docs", warn(missing_docs))]
#![cfg_attr(not(feature = "strict-docs"), allow(missing_docs))]

pub mod classification;
pub mod commit;
pub mod decision;
pub mod domain;
pub mod error;
pub mod risk;

pub use classification::{ComplianceTemplate, DomainClassification};
pub use commit::CommitFacts;
pub use decision::{DecisionBasis, PolicyDecision};
pub use domain::{Domain, SignalVector};
pub use error::{InputError, Result};
pub use risk::{DeploymentStrategy, RiskAssessment, RiskFactor, RiskLevel};
