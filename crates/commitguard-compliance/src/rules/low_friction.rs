use commitguard_types::DecisionBasis;

use crate::context::RuleContext;
use crate::rule::{PolicyRule, RuleOutcome};

/// Rule 2: non-functional changes with an informative message are exempt.
///
/// Applies only when every changed file is allowlisted; an empty file list
/// never qualifies.
#[derive(Debug, Default)]
pub struct LowFrictionRule;

impl PolicyRule for LowFrictionRule {
    fn id(&self) -> &str {
        "low-friction-exemption"
    }

    fn name(&self) -> &str {
        "Low-Friction Exemption"
    }

    fn evaluate(&self, ctx: &RuleContext<'_>) -> RuleOutcome {
        let files = &ctx.facts.changed_files;
        if files.is_empty() || ctx.config.is_low_signal(&ctx.facts.message) {
            return RuleOutcome::Pass;
        }

        if files.iter().all(|f| ctx.config.is_low_friction(f)) {
            RuleOutcome::Allow(DecisionBasis::LowFrictionExemption)
        } else {
            RuleOutcome::Pass
        }
    }

    fn description(&self) -> &str {
        "Exempts documentation, test, tooling and CI-only changes"
    }
}
