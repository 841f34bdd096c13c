//! Risk scoring
//!
//! The score is built additively (critical-path base plus security-pattern
//! points), then amplified by the change-size, domain and missing-test
//! multipliers, then clamped to `[0, 100]` and rounded.

use commitguard_core::{CompiledConfig, LevelThresholds};
use commitguard_types::{CommitFacts, DomainClassification, RiskAssessment, RiskFactor, RiskLevel};
use std::sync::Arc;
use tracing::trace;

pub const CRITICAL_PATH: &str = "critical_path";
pub const SECURITY_PATTERNS: &str = "security_patterns";
pub const CHANGE_SIZE: &str = "change_size";
pub const DOMAIN: &str = "domain";
pub const MISSING_TESTS: &str = "missing_tests";

#[derive(Debug, Clone)]
pub struct RiskScorer {
    config: Arc<CompiledConfig>,
}

impl RiskScorer {
    pub fn new(config: Arc<CompiledConfig>) -> Self {
        Self { config }
    }

    /// Score a commit. Deterministic; never fails.
    pub fn score(
        &self,
        facts: &CommitFacts,
        classification: &DomainClassification,
    ) -> RiskAssessment {
        let risk = &self.config.config().risk;
        let mut factors = Vec::new();

        let critical: Vec<(&str, f64)> = facts
            .changed_files
            .iter()
            .filter_map(|file| {
                self.config
                    .critical_path_for(file)
                    .map(|c| (c.pattern.as_str(), c.weight))
            })
            .collect();
        let base: f64 = critical
            .iter()
            .map(|(_, weight)| risk.critical_path_base * weight)
            .sum();
        if !critical.is_empty() {
            let mut kinds: Vec<&str> = critical.iter().map(|(p, _)| *p).collect();
            kinds.sort_unstable();
            kinds.dedup();
            factors.push(RiskFactor::new(
                CRITICAL_PATH,
                base,
                format!("{} critical file(s): {}", critical.len(), kinds.join(", ")),
            ));
        }

        let security: Vec<&str> = self
            .config
            .security_patterns()
            .iter()
            .filter(|p| p.regex.is_match(&facts.diff_text))
            .map(|p| p.name.as_str())
            .collect();
        let security_points = security.len() as f64 * risk.security_pattern_points;
        if !security.is_empty() {
            factors.push(RiskFactor::new(
                SECURITY_PATTERNS,
                security_points,
                format!("security-sensitive patterns: {}", security.join(", ")),
            ));
        }

        let mut score = base + security_points;

        let lines = facts.changed_line_count();
        let size_multiplier = if lines > risk.large_change_lines {
            risk.large_change_multiplier
        } else if lines >= risk.medium_change_lines {
            risk.medium_change_multiplier
        } else {
            1.0
        };
        score *= size_multiplier;
        if size_multiplier != 1.0 {
            factors.push(RiskFactor::new(
                CHANGE_SIZE,
                size_multiplier,
                format!("{lines} changed lines"),
            ));
        }

        if let Some(domain) = classification.dominant_domain {
            let multiplier = risk.domain_multipliers.get(&domain).copied().unwrap_or(1.0);
            score *= multiplier;
            if multiplier != 1.0 {
                factors.push(RiskFactor::new(
                    DOMAIN,
                    multiplier,
                    format!("dominant domain {domain}"),
                ));
            }
        }

        if !facts.changed_files.iter().any(|f| self.config.is_test_path(f)) {
            score *= risk.missing_test_multiplier;
            if risk.missing_test_multiplier != 1.0 {
                factors.push(RiskFactor::new(
                    MISSING_TESTS,
                    risk.missing_test_multiplier,
                    "no test file changed",
                ));
            }
        }

        let score = clamp_score(score);
        let level = level_for(score, risk.levels);

        trace!(sha = %facts.sha, score, level = %level, "Scored commit");

        RiskAssessment {
            score,
            level,
            strategy: level.deployment_strategy(),
            factors,
        }
    }
}

/// Clamp a raw score to `[0, 100]` and round to an integer.
pub fn clamp_score(raw: f64) -> u8 {
    if raw.is_nan() {
        return 0;
    }
    raw.clamp(0.0, 100.0).round() as u8
}

/// Map a score to its level (inclusive lower bounds).
pub fn level_for(score: u8, levels: LevelThresholds) -> RiskLevel {
    if score >= levels.critical {
        RiskLevel::Critical
    } else if score >= levels.high {
        RiskLevel::High
    } else if score >= levels.medium {
        RiskLevel::Medium
    } else {
        RiskLevel::Low
    }
}
