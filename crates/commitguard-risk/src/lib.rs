//! # CommitGuard Risk
//!
//! Weighted 0-100 risk scoring.
//!
//! [`RiskScorer`] composes a critical-path base score and security-pattern
//! points with multiplicative amplifiers for change size, dominant domain and
//! missing tests. Every contributor is reported as a
//! [`RiskFactor`](commitguard_types::RiskFactor) so a reviewer can see why a
//! commit scored the way it did.

#![deny(unsafe_code)]
#![cfg_attr(feature = "strict-docs", warn(missing_docs))]
#![cfg_attr(not(feature = "strict-docs"), allow(missing_docs))]

pub mod scorer;

pub use scorer::{clamp_score, level_for, RiskScorer};
