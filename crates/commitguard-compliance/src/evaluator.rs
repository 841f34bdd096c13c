//! Policy evaluator
//!
//! Runs the ordered rule set over one commit. An `Allow` from the bypass or
//! low-friction rule ends evaluation; otherwise every remaining rule runs and
//! their deny reasons are combined in rule order.

use commitguard_core::CompiledConfig;
use commitguard_types::{
    CommitFacts, DecisionBasis, DomainClassification, PolicyDecision, RiskAssessment,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, warn};

use crate::advisories;
use crate::context::RuleContext;
use crate::rule::{PolicyRule, RuleOutcome, RuleRecord};
use crate::rules::standard_rules;

/// Decision plus the per-rule trail that produced it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PolicyEvaluation {
    pub decision: PolicyDecision,
    pub records: Vec<RuleRecord>,
}

#[derive(Debug)]
pub struct PolicyEvaluator {
    config: Arc<CompiledConfig>,
    rules: Vec<Box<dyn PolicyRule>>,
}

impl PolicyEvaluator {
    pub fn new(config: Arc<CompiledConfig>) -> Self {
        Self {
            config,
            rules: standard_rules(),
        }
    }

    /// Rules in evaluation order
    pub fn rules(&self) -> impl Iterator<Item = &dyn PolicyRule> {
        self.rules.iter().map(|r| r.as_ref())
    }

    /// Evaluate and return only the decision
    pub fn decide(
        &self,
        facts: &CommitFacts,
        classification: &DomainClassification,
        risk: &RiskAssessment,
    ) -> PolicyDecision {
        self.evaluate(facts, classification, risk).decision
    }

    pub fn evaluate(
        &self,
        facts: &CommitFacts,
        classification: &DomainClassification,
        risk: &RiskAssessment,
    ) -> PolicyEvaluation {
        let ctx = RuleContext::new(facts, classification, risk, &self.config);
        let mut records = Vec::with_capacity(self.rules.len());
        let mut reasons = Vec::new();

        for rule in &self.rules {
            let start = Instant::now();
            let outcome = rule.evaluate(&ctx);
            let duration_us = start.elapsed().as_micros() as u64;

            debug!(
                sha = %facts.sha,
                rule = rule.id(),
                outcome = outcome.label(),
                duration_us,
                "Rule evaluated"
            );
            records.push(RuleRecord::new(rule.id(), rule.name(), outcome.clone(), duration_us));

            match outcome {
                RuleOutcome::Pass => {}
                RuleOutcome::Allow(basis) => {
                    if basis == DecisionBasis::EmergencyBypass {
                        warn!(
                            sha = %facts.sha,
                            marker = %self.config.config().policy.bypass_marker,
                            "Emergency bypass used; policy rules skipped"
                        );
                    }
                    let mut decision = PolicyDecision::allow(basis, ctx.reviewers());
                    if basis != DecisionBasis::EmergencyBypass {
                        decision = decision.with_advisories(advisories::collect(&ctx));
                    }
                    return PolicyEvaluation { decision, records };
                }
                RuleOutcome::Deny(rule_reasons) => reasons.extend(rule_reasons),
            }
        }

        let decision = PolicyDecision::from_reasons(
            DecisionBasis::RuleEvaluation,
            reasons,
            ctx.required_metadata_fields(),
            ctx.reviewers(),
        )
        .with_advisories(advisories::collect(&ctx));

        if decision.is_denied() {
            warn!(
                sha = %facts.sha,
                reasons = decision.deny_reasons.len(),
                first = decision.deny_reasons.first().map(String::as_str).unwrap_or_default(),
                "Commit denied"
            );
        }

        PolicyEvaluation { decision, records }
    }
}
