use crate::context::RuleContext;
use crate::rule::{PolicyRule, RuleOutcome};

pub const MULTI_DOMAIN_REASON: &str = "multi-domain change requires compliance metadata";

/// Rule 6: a commit touching two or more critical domains needs metadata for
/// each of them.
///
/// Counts every critical file, allowlisted or not, and applies even when no
/// template was selected.
#[derive(Debug, Default)]
pub struct MultiDomainEscalationRule;

impl PolicyRule for MultiDomainEscalationRule {
    fn id(&self) -> &str {
        "multi-domain-escalation"
    }

    fn name(&self) -> &str {
        "Multi-Domain Escalation"
    }

    fn evaluate(&self, ctx: &RuleContext<'_>) -> RuleOutcome {
        let domains = ctx.critical_domains();
        if domains.len() < 2 {
            return RuleOutcome::Pass;
        }

        let uncovered: Vec<String> = ctx
            .uncovered_domains()
            .iter()
            .map(|(domain, accepted)| {
                format!(
                    "{domain} (one of [{}])",
                    accepted.iter().copied().collect::<Vec<_>>().join(", ")
                )
            })
            .collect();

        if uncovered.is_empty() {
            return RuleOutcome::Pass;
        }

        let spanned: Vec<&str> = domains.keys().map(|d| d.as_str()).collect();
        RuleOutcome::deny(format!(
            "{MULTI_DOMAIN_REASON}: change spans {}; missing for {}",
            spanned.join(" + "),
            uncovered.join(", ")
        ))
    }

    fn description(&self) -> &str {
        "Escalates cross-domain critical changes to mandatory metadata"
    }
}
