use crate::context::RuleContext;
use crate::rule::{PolicyRule, RuleOutcome};

pub const LOW_SIGNAL_REASON: &str = "low-signal commit message";

/// Rule 3: reject placeholder messages regardless of domain.
#[derive(Debug, Default)]
pub struct LowSignalRule;

impl PolicyRule for LowSignalRule {
    fn id(&self) -> &str {
        "low-signal-message"
    }

    fn name(&self) -> &str {
        "Low-Signal Message"
    }

    fn description(&self) -> &str {
        "Rejects placeholder messages such as wip, temp, fixup or a bare update"
    }

    fn evaluate(&self, ctx: &RuleContext<'_>) -> RuleOutcome {
        if !ctx.config.is_low_signal(&ctx.facts.message) {
            return RuleOutcome::Pass;
        }

        let policy = &ctx.config.config().policy;
        RuleOutcome::deny(format!(
            "{LOW_SIGNAL_REASON}: describe what changed and why (avoid {}, or a bare {})",
            policy.low_signal_terms.join("/"),
            policy
                .low_signal_messages
                .iter()
                .map(|m| format!("'{m}'"))
                .collect::<Vec<_>>()
                .join(" or "),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::fixtures::*;
    use commitguard_types::{CommitFacts, DomainClassification, RiskLevel};

    fn outcome(message: &str) -> RuleOutcome {
        let config = config();
        let facts = CommitFacts::new("abc", message).with_file("docs/a.md");
        let classification = DomainClassification::unclassified();
        let risk = risk(RiskLevel::Low);
        let ctx = RuleContext::new(&facts, &classification, &risk, &config);
        LowSignalRule.evaluate(&ctx)
    }

    #[test]
    fn test_wip_denied() {
        match outcome("WIP: some stuff") {
            RuleOutcome::Deny(reasons) => {
                assert_eq!(reasons.len(), 1);
                assert!(reasons[0].starts_with(LOW_SIGNAL_REASON));
            }
            other => panic!("expected deny, got {other:?}"),
        }
    }

    #[test]
    fn test_bare_update_denied() {
        assert!(outcome("update").is_deny());
        assert!(outcome("UPDATE\n").is_deny());
    }

    #[test]
    fn test_informative_message_passes() {
        assert!(outcome("docs(readme): update install steps").is_pass());
        assert!(outcome("feat(forms): add field validation").is_pass());
    }

    #[test]
    fn test_term_inside_word_denied() {
        assert!(outcome("fix(cache): tempfix stale entries").is_deny());
        assert!(outcome("chore(ci): fixups for lint").is_deny());
    }
}
