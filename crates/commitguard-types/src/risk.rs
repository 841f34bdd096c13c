//! Risk assessment types

use serde::{Deserialize, Serialize};
use std::fmt;

/// Risk level, a strict partition of the 0-100 score range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RiskLevel {
    Low,
    Medium,
    High,
    Critical,
}

impl RiskLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            RiskLevel::Low => "LOW",
            RiskLevel::Medium => "MEDIUM",
            RiskLevel::High => "HIGH",
            RiskLevel::Critical => "CRITICAL",
        }
    }

    /// Whether the audit team must review changes at this level
    pub fn requires_audit(&self) -> bool {
        matches!(self, RiskLevel::High | RiskLevel::Critical)
    }

    /// Recommended rollout strategy for this level
    pub fn deployment_strategy(&self) -> DeploymentStrategy {
        match self {
            RiskLevel::Low => DeploymentStrategy::Standard,
            RiskLevel::Medium => DeploymentStrategy::Canary,
            RiskLevel::High | RiskLevel::Critical => DeploymentStrategy::BlueGreen,
        }
    }
}

impl fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Rollout recommendation derived from the risk level. Informational only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DeploymentStrategy {
    Standard,
    Canary,
    BlueGreen,
}

/// A single contributor to the risk score.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RiskFactor {
    /// Factor name (e.g. `critical_path`, `change_size`)
    pub name: String,

    /// Additive points, or the multiplier applied, depending on the factor
    pub value: f64,

    /// Human-readable detail
    pub detail: String,
}

impl RiskFactor {
    pub fn new(name: impl Into<String>, value: f64, detail: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value,
            detail: detail.into(),
        }
    }
}

/// Output of the risk scorer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RiskAssessment {
    /// Final score, clamped to `[0, 100]`
    pub score: u8,

    /// Level derived from `score`
    pub level: RiskLevel,

    /// Rollout recommendation derived from `level`
    pub strategy: DeploymentStrategy,

    /// Contributors in the order they were applied
    pub factors: Vec<RiskFactor>,
}
