use crate::context::RuleContext;
use crate::rule::{PolicyRule, RuleOutcome};

pub const INVALID_FORMAT_REASON: &str = "invalid commit format";

/// Rule 4: the subject line must read `type(scope): summary`.
///
/// A `!` after the scope marks a breaking change and is accepted.
#[derive(Debug, Default)]
pub struct CommitFormatRule;

impl CommitFormatRule {
    fn usage(ctx: &RuleContext<'_>) -> String {
        format!(
            "usage: type(scope): summary, where type is one of {} and scope is lowercase, \
             e.g. `feat(payment): add apple pay support`",
            ctx.config.config().policy.commit_types.join("|")
        )
    }
}

impl PolicyRule for CommitFormatRule {
    fn id(&self) -> &str {
        "commit-format"
    }

    fn name(&self) -> &str {
        "Commit Format"
    }

    fn description(&self) -> &str {
        "Requires a `type(scope): summary` subject within the length limit"
    }

    fn evaluate(&self, ctx: &RuleContext<'_>) -> RuleOutcome {
        let subject = ctx.facts.subject();
        let max = ctx.config.config().policy.max_subject_length;

        let problem = match ctx.config.parse_subject(subject) {
            None => format!("subject `{subject}` does not match type(scope): summary"),
            Some(parsed) if parsed.summary.trim().is_empty() => "summary is empty".to_string(),
            Some(_) if subject.chars().count() > max => format!(
                "subject is {} characters (max {max})",
                subject.chars().count()
            ),
            Some(_) => return RuleOutcome::Pass,
        };

        RuleOutcome::deny(format!(
            "{INVALID_FORMAT_REASON}: {problem}; {}",
            Self::usage(ctx)
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
        let facts = CommitFacts::new("abc", message);
        let classification = DomainClassification::unclassified();
        let risk = risk(RiskLevel::Low);
        let ctx = RuleContext::new(&facts, &classification, &risk, &config);
        CommitFormatRule.evaluate(&ctx)
    }

    fn reason(message: &str) -> String {
        match outcome(message) {
            RuleOutcome::Deny(reasons) => reasons.join("\n"),
            other => panic!("expected deny for {message:?}, got {other:?}"),
        }
    }

    #[test]
    fn test_valid_subjects() {
        assert!(outcome("feat(payment): add apple pay support").is_pass());
        assert!(outcome("fix(auth-service): refresh tokens\n\nbody text").is_pass());
        assert!(outcome("feat(api)!: drop v1 routes").is_pass());
        assert!(outcome("security(phi/encryption): rotate keys").is_pass());
    }

    #[test]
    fn test_missing_scope_is_invalid() {
        let reason = reason("feat: add apple pay");
        assert!(reason.starts_with(INVALID_FORMAT_REASON));
        assert!(reason.contains("usage: type(scope): summary"));
    }

    #[test]
    fn test_unknown_type_is_invalid() {
        assert!(outcome("feature(payment): add apple pay").is_deny());
        assert!(outcome("WIP: some stuff").is_deny());
    }

    #[test]
    fn test_empty_summary_is_invalid() {
        assert!(reason("feat(payment):  ").contains(INVALID_FORMAT_REASON));
    }

    #[test]
    fn test_overlong_subject_is_invalid() {
        let subject = format!("feat(payment): {}", "a".repeat(100));
        assert!(reason(&subject).contains("max 100"));
    }
}
