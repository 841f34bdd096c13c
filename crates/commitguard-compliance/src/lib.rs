//! # CommitGuard Compliance
//!
//! Ordered policy evaluation for commits.
//!
//! ## Rules
//!
//! | # | rule | effect |
//! |---|------|--------|
//! | 1 | [`EmergencyBypassRule`] | `[skip-policy]` allows unconditionally |
//! | 2 | [`LowFrictionRule`] | docs/tests/tooling-only changes are allowed |
//! | 3 | [`LowSignalRule`] | `wip`, `temp`, `fixup` or a bare `update` is denied |
//! | 4 | [`CommitFormatRule`] | subject must read `type(scope): summary` |
//! | 5 | [`CriticalPathMetadataRule`] | critical paths need a compliance marker |
//! | 6 | [`MultiDomainEscalationRule`] | cross-domain changes need markers for every domain |
//!
//! Rules 1 and 2 end evaluation with an allow. Rules 3 to 6 always run and
//! their reasons are combined, so a denied commit lists every problem at once.
//!
//! Reviewers come from the selected template, plus the audit reviewer when
//! the risk level is `HIGH` or `CRITICAL`. Advisories are attached to the
//! decision but never change `allowed`.

#![deny(unsafe_code)]
#![cfg_attr(feature = "strict-docs", warn(missing_docs))]
#![cfg_attr(not(feature = "strict-docs"), allow(missing_docs))]

pub mod advisories;
pub mod context;
pub mod evaluator;
pub mod markers;
pub mod rule;
pub mod rules;

pub use context::{CriticalFile, RuleContext};
pub use evaluator::{PolicyEvaluation, PolicyEvaluator};
pub use markers::{Marker, MetadataMarkers};
pub use rule::{PolicyRule, RuleOutcome, RuleRecord};
pub use rules::{
    standard_rules, CommitFormatRule, CriticalPathMetadataRule, EmergencyBypassRule,
    LowFrictionRule, LowSignalRule, MultiDomainEscalationRule,
};
