//! Policy rule trait and evaluation records

use commitguard_types::DecisionBasis;
use serde::{Deserialize, Serialize};

use crate::context::RuleContext;

/// Outcome of a single rule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "result", content = "detail", rename_all = "snake_case")]
pub enum RuleOutcome {
    /// Rule does not apply, continue with the next one
    Pass,

    /// Unconditional allow; no later rule is evaluated
    Allow(DecisionBasis),

    /// Deny with one or more reasons; later rules still run
    Deny(Vec<String>),
}

impl RuleOutcome {
    /// Deny with a single reason
    pub fn deny(reason: impl Into<String>) -> Self {
        RuleOutcome::Deny(vec![reason.into()])
    }

    pub fn is_pass(&self) -> bool {
        matches!(self, RuleOutcome::Pass)
    }

    pub fn is_allow(&self) -> bool {
        matches!(self, RuleOutcome::Allow(_))
    }

    pub fn is_deny(&self) -> bool {
        matches!(self, RuleOutcome::Deny(_))
    }

    /// Short label for logs and tables
    pub fn label(&self) -> &'static str {
        match self {
            RuleOutcome::Pass => "pass",
            RuleOutcome::Allow(_) => "allow",
            RuleOutcome::Deny(_) => "deny",
        }
    }
}

/// One rule of the ordered policy.
///
/// Rules are pure: the outcome depends only on the context.
pub trait PolicyRule: Send + Sync + std::fmt::Debug {
    /// Stable identifier, recorded in audit output
    fn id(&self) -> &str;

    /// Human-readable name
    fn name(&self) -> &str;

    fn evaluate(&self, ctx: &RuleContext<'_>) -> RuleOutcome;

    fn description(&self) -> &str {
        "Policy rule"
    }
}

/// Record of a single rule evaluation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RuleRecord {
    pub rule_id: String,
    pub rule_name: String,
    pub outcome: RuleOutcome,

    /// Evaluation duration in microseconds
    pub duration_us: u64,
}

impl RuleRecord {
    pub fn new(
        rule_id: impl Into<String>,
        rule_name: impl Into<String>,
        outcome: RuleOutcome,
        duration_us: u64,
    ) -> Self {
        Self {
            rule_id: rule_id.into(),
            rule_name: rule_name.into(),
            outcome,
            duration_us,
        }
    }
}
