//! # CommitGuard
//!
//! Commit compliance risk and policy engine.
//!
//! Classifies a proposed commit by regulatory domain, scores its risk and
//! renders an allow/deny decision with actionable reasons, required metadata
//! fields and reviewers. The engine only consumes structured commit facts; it
//! performs no I/O during evaluation and holds no mutable state, so any number
//! of evaluations may run concurrently.
//!
//! ## Pipeline
//!
//! ```text
//! CommitFacts -> SignalExtractor -> DomainClassifier -> RiskScorer
//!             -> PolicyEvaluator -> EvaluationReport / AuditRecord
//! ```
//!
//! ## Example
//!
//! ```rust,no_run
//! use commitguard::{CommitFacts, CommitGuardEngine};
//!
//! let engine = CommitGuardEngine::with_defaults()?;
//! let facts = CommitFacts::new("9f2c1e7", "feat(payment): add apple pay support")
//!     .with_file("services/payment-gateway/payment.go");
//!
//! let decision = engine.check(&facts)?;
//! if !decision.allowed {
//!     for reason in &decision.deny_reasons {
//!         eprintln!("denied: {reason}");
//!     }
//! }
//! # Ok::<(), commitguard::EngineError>(())
//! ```

#![deny(unsafe_code)]
#![cfg_attr(feature = "strict-docs", warn(missing_docs))]
#![cfg_attr(not(feature = "strict-docs"), allow(missing_docs))]

pub mod batch;
pub mod engine;
pub mod error;
pub mod report;

pub use batch::{BatchSummary, DEFAULT_CONCURRENCY};
pub use engine::CommitGuardEngine;
pub use error::{EngineError, Result};
pub use report::{inputs_digest, AuditRecord, CommitDecision, EvaluationReport};

pub use commitguard_compliance::{PolicyEvaluation, PolicyRule, RuleOutcome, RuleRecord};
pub use commitguard_core::{CompiledConfig, ConfigError, EngineConfig};
pub use commitguard_signals::{SignalExtraction, SignalHit, SignalSource};
pub use commitguard_types::{
    CommitFacts, DecisionBasis, DeploymentStrategy, Domain, DomainClassification, InputError,
    PolicyDecision, RiskAssessment, RiskFactor, RiskLevel, SignalVector,
};
