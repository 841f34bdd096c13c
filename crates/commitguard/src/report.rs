//! Decision aggregation
//!
//! [`EvaluationReport`] holds every intermediate value of one evaluation.
//! [`CommitDecision`] is the compact record an enforcement point consumes;
//! [`AuditRecord`] is the full trail an external audit store persists.

use chrono::{DateTime, Utc};
use commitguard_compliance::RuleRecord;
use commitguard_signals::SignalExtraction;
use commitguard_types::{
    CommitFacts, DeploymentStrategy, DomainClassification, PolicyDecision, RiskAssessment,
    RiskLevel,
};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// All intermediate values of one evaluation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EvaluationReport {
    pub signals: SignalExtraction,
    pub classification: DomainClassification,
    pub risk: RiskAssessment,
    pub decision: PolicyDecision,

    /// Rules in the order they ran
    pub rules: Vec<RuleRecord>,
}

impl EvaluationReport {
    /// The enforcement-point view of this evaluation
    pub fn output(&self) -> CommitDecision {
        CommitDecision {
            allowed: self.decision.allowed,
            deny_reasons: self.decision.deny_reasons.clone(),
            domain: self.classification.domain_label().to_string(),
            confidence: self.classification.confidence,
            risk_score: self.risk.score,
            risk_level: self.risk.level,
            required_metadata_fields: self.decision.required_metadata_fields.clone(),
            reviewers: self.decision.reviewers.clone(),
        }
    }
}

/// Decision record consumed by a pre-merge gate or CI check.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CommitDecision {
    pub allowed: bool,
    pub deny_reasons: Vec<String>,

    /// `phi`, `financial`, `medical_device` or `none`
    pub domain: String,

    pub confidence: f64,
    pub risk_score: u8,
    pub risk_level: RiskLevel,
    pub required_metadata_fields: BTreeSet<String>,
    pub reviewers: BTreeSet<String>,
}

/// Audit trail for one evaluation, ready for external persistence.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuditRecord {
    /// Unique record identifier
    pub id: String,

    pub sha: String,
    pub evaluated_at: DateTime<Utc>,

    /// Content digest of the commit facts
    pub inputs_digest: String,

    /// Content digest of the configuration that produced the decision
    pub config_digest: String,

    pub engine_version: String,

    /// Whether the emergency bypass decided the outcome
    pub bypassed: bool,

    pub decision: CommitDecision,
    pub advisories: Vec<String>,
    pub deployment_strategy: DeploymentStrategy,
    pub report: EvaluationReport,
}

impl AuditRecord {
    pub fn new(facts: &CommitFacts, report: EvaluationReport, config_digest: &str) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            sha: facts.sha.clone(),
            evaluated_at: Utc::now(),
            inputs_digest: inputs_digest(facts),
            config_digest: config_digest.to_string(),
            engine_version: env!("CARGO_PKG_VERSION").to_string(),
            bypassed: report.decision.was_bypassed(),
            decision: report.output(),
            advisories: report.decision.advisories.clone(),
            deployment_strategy: report.risk.strategy,
            report,
        }
    }

    pub fn was_allowed(&self) -> bool {
        self.decision.allowed
    }
}

/// blake3 digest over the commit facts, fields length-prefixed.
pub fn inputs_digest(facts: &CommitFacts) -> String {
    let mut hasher = blake3::Hasher::new();
    let mut field = |bytes: &[u8]| {
        hasher.update(&(bytes.len() as u64).to_le_bytes());
        hasher.update(bytes);
    };

    field(facts.sha.as_bytes());
    field(facts.message.as_bytes());
    field(&(facts.changed_files.len() as u64).to_le_bytes());
    for file in &facts.changed_files {
        field(file.as_bytes());
    }
    field(facts.diff_text.as_bytes());

    hasher.finalize().to_hex().to_string()
}
