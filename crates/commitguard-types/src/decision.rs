//! Policy decision types
//!
//! A decision is allowed exactly when it carries no deny reasons; the
//! constructors derive `allowed` from the reason list.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// How the final outcome was reached.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DecisionBasis {
    /// `[skip-policy]` marker; nothing else was evaluated
    EmergencyBypass,

    /// Every changed file is non-functional and the message is informative
    LowFrictionExemption,

    /// The ordered rule set ran to completion
    RuleEvaluation,
}

/// Policy evaluation decision
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PolicyDecision {
    /// Whether the change may merge
    pub allowed: bool,

    /// Reasons for denial, in rule order; empty iff `allowed`
    pub deny_reasons: Vec<String>,

    /// Metadata fields the commit message must contain
    pub required_metadata_fields: BTreeSet<String>,

    /// Reviewers assigned to the change
    pub reviewers: BTreeSet<String>,

    /// Non-blocking observations about the commit
    pub advisories: Vec<String>,

    /// How the outcome was reached
    pub basis: DecisionBasis,
}

impl PolicyDecision {
    /// Build a decision; `allowed` is derived from the reasons
    pub fn from_reasons(
        basis: DecisionBasis,
        deny_reasons: Vec<String>,
        required_metadata_fields: BTreeSet<String>,
        reviewers: BTreeSet<String>,
    ) -> Self {
        Self {
            allowed: deny_reasons.is_empty(),
            deny_reasons,
            required_metadata_fields,
            reviewers,
            advisories: Vec::new(),
            basis,
        }
    }

    /// Unconditional allow (bypass or exemption)
    pub fn allow(basis: DecisionBasis, reviewers: BTreeSet<String>) -> Self {
        Self::from_reasons(basis, Vec::new(), BTreeSet::new(), reviewers)
    }

    /// Attach advisories
    pub fn with_advisories(mut self, advisories: Vec<String>) -> Self {
        self.advisories = advisories;
        self
    }

    pub fn is_allowed(&self) -> bool {
        self.allowed
    }

    pub fn is_denied(&self) -> bool {
        !self.allowed
    }

    pub fn was_bypassed(&self) -> bool {
        self.basis == DecisionBasis::EmergencyBypass
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_allow_has_no_reasons() {
        let decision = PolicyDecision::allow(DecisionBasis::LowFrictionExemption, BTreeSet::new());
        assert!(decision.is_allowed());
        assert!(decision.deny_reasons.is_empty());
        assert!(!decision.was_bypassed());
    }

    #[test]
    fn test_reasons_imply_deny() {
        let decision = PolicyDecision::from_reasons(
            DecisionBasis::RuleEvaluation,
            vec!["low-signal commit message".into()],
            BTreeSet::new(),
            BTreeSet::new(),
        );
        assert!(decision.is_denied());
        assert_eq!(decision.deny_reasons.len(), 1);
    }

    #[test]
    fn test_with_advisories_keeps_outcome() {
        let decision = PolicyDecision::allow(DecisionBasis::RuleEvaluation, BTreeSet::new())
            .with_advisories(vec!["no ticket reference".into()]);
        assert!(decision.is_allowed());
        assert_eq!(decision.advisories.len(), 1);
    }

    #[test]
    fn test_bypass_basis() {
        let decision = PolicyDecision::allow(DecisionBasis::EmergencyBypass, BTreeSet::new());
        assert!(decision.was_bypassed());
    }
}
