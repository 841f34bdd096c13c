use commitguard_types::DecisionBasis;

use crate::context::RuleContext;
use crate::rule::{PolicyRule, RuleOutcome};

/// Rule 1: the bypass marker allows unconditionally.
///
/// Used to push a fix during an engine outage. Never denied, always audited.
#[derive(Debug, Default)]
pub struct EmergencyBypassRule;

impl PolicyRule for EmergencyBypassRule {
    fn id(&self) -> &str {
        "emergency-bypass"
    }

    fn name(&self) -> &str {
        "Emergency Bypass"
    }

    fn evaluate(&self, ctx: &RuleContext<'_>) -> RuleOutcome {
        if ctx.config.has_bypass_marker(&ctx.facts.message) {
            RuleOutcome::Allow(DecisionBasis::EmergencyBypass)
        } else {
            RuleOutcome::Pass
        }
    }

    fn description(&self) -> &str {
        "Allows any commit whose message carries the bypass marker"
    }
}
