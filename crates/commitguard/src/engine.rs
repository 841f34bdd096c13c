//! Evaluation engine
//!
//! Wires the pipeline stages together over one shared, compiled
//! configuration. Cloning the engine is cheap and clones share the same
//! configuration.

use commitguard_compliance::PolicyEvaluator;
use commitguard_core::{CompiledConfig, EngineConfig};
use commitguard_risk::RiskScorer;
use commitguard_signals::{DomainClassifier, SignalExtractor};
use commitguard_types::{CommitFacts, PolicyDecision};
use std::path::Path;
use std::sync::Arc;
use tracing::info;

use crate::error::Result;
use crate::report::{AuditRecord, CommitDecision, EvaluationReport};

#[derive(Debug, Clone)]
pub struct CommitGuardEngine {
    config: Arc<CompiledConfig>,
    extractor: SignalExtractor,
    classifier: DomainClassifier,
    scorer: RiskScorer,
    evaluator: Arc<PolicyEvaluator>,
}

impl CommitGuardEngine {
    /// Validate and compile a configuration, then build the engine
    pub fn new(config: EngineConfig) -> Result<Self> {
        Ok(Self::from_compiled(Arc::new(config.compile()?)))
    }

    /// Engine over the built-in reference tables
    pub fn with_defaults() -> Result<Self> {
        Self::new(EngineConfig::default())
    }

    /// Engine over the configuration file, or the defaults when none is given
    pub fn load(path: Option<&Path>) -> Result<Self> {
        Self::new(EngineConfig::load(path)?)
    }

    pub fn from_compiled(config: Arc<CompiledConfig>) -> Self {
        Self {
            extractor: SignalExtractor::new(Arc::clone(&config)),
            classifier: DomainClassifier::new(Arc::clone(&config)),
            scorer: RiskScorer::new(Arc::clone(&config)),
            evaluator: Arc::new(PolicyEvaluator::new(Arc::clone(&config))),
            config,
        }
    }

    pub fn config(&self) -> &CompiledConfig {
        &self.config
    }

    pub fn evaluator(&self) -> &PolicyEvaluator {
        &self.evaluator
    }

    /// Run the full pipeline over one commit.
    ///
    /// Facts are validated first; a malformed input is an error, never an
    /// allow.
    pub fn evaluate(&self, facts: &CommitFacts) -> Result<EvaluationReport> {
        facts.validate()?;

        let signals = self.extractor.extract_detailed(facts);
        let classification = self.classifier.classify(&signals.vector);
        let risk = self.scorer.score(facts, &classification);
        let evaluation = self.evaluator.evaluate(facts, &classification, &risk);

        info!(
            sha = %facts.sha,
            domain = classification.domain_label(),
            confidence = classification.confidence,
            risk_score = risk.score,
            risk_level = %risk.level,
            allowed = evaluation.decision.allowed,
            basis = ?evaluation.decision.basis,
            "Commit evaluated"
        );

        Ok(EvaluationReport {
            signals,
            classification,
            risk,
            decision: evaluation.decision,
            rules: evaluation.records,
        })
    }

    /// Policy decision only
    pub fn decide(&self, facts: &CommitFacts) -> Result<PolicyDecision> {
        Ok(self.evaluate(facts)?.decision)
    }

    /// Enforcement-point output record
    pub fn check(&self, facts: &CommitFacts) -> Result<CommitDecision> {
        Ok(self.evaluate(facts)?.output())
    }

    /// Evaluate and wrap the result in an audit record
    pub fn evaluate_with_audit(&self, facts: &CommitFacts) -> Result<AuditRecord> {
        let report = self.evaluate(facts)?;
        Ok(AuditRecord::new(facts, report, self.config.digest()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::EngineError;
    use commitguard_types::{InputError, RiskLevel};

    fn engine() -> CommitGuardEngine {
        CommitGuardEngine::with_defaults().unwrap()
    }

    #[test]
    fn test_invalid_facts_are_errors() {
        let err = engine().evaluate(&CommitFacts::new("  ", "feat(api): x")).unwrap_err();
        assert!(matches!(err, EngineError::Input(InputError::EmptySha)));

        let facts = CommitFacts::new("abc", "feat(api): x").with_file("");
        let err = engine().decide(&facts).unwrap_err();
        assert!(matches!(err, EngineError::Input(InputError::EmptyPath { index: 0 })));
    }

    #[test]
    fn test_invalid_config_refuses_to_build() {
        let mut config = EngineConfig::default();
        config.policy.low_friction_patterns.push("[".into());
        assert!(matches!(
            CommitGuardEngine::new(config).unwrap_err(),
            EngineError::Config(_)
        ));
    }

    #[test]
    fn test_output_contract() {
        let facts = CommitFacts::new("abc", "feat(device): update diagnostics pipeline")
            .with_file("services/medical-device/diagnostic.go")
            .with_diff("+// diagnostics entry point\n");
        let output = engine().check(&facts).unwrap();
        assert!(!output.allowed);
        assert_eq!(output.domain, "medical_device");
        assert_eq!(output.risk_level, RiskLevel::High);
        assert!(output.reviewers.contains("audit-team"));

        let json = serde_json::to_value(&output).unwrap();
        for key in [
            "allowed",
            "denyReasons",
            "domain",
            "confidence",
            "riskScore",
            "riskLevel",
            "requiredMetadataFields",
            "reviewers",
        ] {
            assert!(json.get(key).is_some(), "missing {key}");
        }
    }

    #[test]
    fn test_audit_record_carries_digests() {
        let engine = engine();
        let facts = CommitFacts::new("abc", "docs(readme): fix typo").with_file("README.md");
        let record = engine.evaluate_with_audit(&facts).unwrap();
        assert!(record.was_allowed());
        assert!(!record.bypassed);
        assert_eq!(record.sha, "abc");
        assert_eq!(record.config_digest, engine.config().digest());
        assert_eq!(record.inputs_digest, crate::report::inputs_digest(&facts));
        assert_eq!(record.report.rules.len(), 2);
    }

    #[test]
    fn test_clones_share_config() {
        let engine = engine();
        let clone = engine.clone();
        assert!(std::ptr::eq(engine.config(), clone.config()));
    }
}
