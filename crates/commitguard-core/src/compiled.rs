//! Validated configuration with compiled matchers
//!
//! [`CompiledConfig::compile`] is the only way to obtain a configuration the
//! pipeline will accept. It checks every numeric bound and compiles every
//! regular expression once; afterwards the value is read-only and is shared
//! between evaluations behind an `Arc`.

use commitguard_types::Domain;
use regex::{Regex, RegexBuilder, RegexSet, RegexSetBuilder};
use std::collections::BTreeSet;
use tracing::debug;

use crate::config::{CriticalPath, EngineConfig, PolicyConfig, WeightedPattern};
use crate::error::{ConfigError, Result};

/// Upper bound on the compiled size of any single expression.
pub const REGEX_SIZE_LIMIT: usize = 1 << 20;

/// A compiled code-pattern row.
#[derive(Debug, Clone)]
pub struct CodePattern {
    pub regex: Regex,
    pub domain: Domain,
    pub weight: f64,
}

/// A compiled security-pattern row.
#[derive(Debug, Clone)]
pub struct SecurityPattern {
    pub name: String,
    pub regex: Regex,
}

/// A parsed conventional-commit subject line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Subject<'a> {
    pub kind: &'a str,
    pub scope: &'a str,
    pub breaking: bool,
    pub summary: &'a str,
}

/// Engine configuration after validation and regex compilation.
#[derive(Debug, Clone)]
pub struct CompiledConfig {
    config: EngineConfig,
    digest: String,
    code_patterns: Vec<CodePattern>,
    security_patterns: Vec<SecurityPattern>,
    test_markers: RegexSet,
    low_friction: RegexSet,
    low_signal: Regex,
    subject: Regex,
    ticket: Regex,
    cve: Regex,
}

impl CompiledConfig {
    /// Validate and compile a configuration
    pub fn compile(config: EngineConfig) -> Result<Self> {
        validate(&config)?;

        let code_patterns = config
            .signals
            .code_patterns
            .iter()
            .map(|row| {
                Ok(CodePattern {
                    regex: build_regex("signals.code_patterns", &row.pattern, true)?,
                    domain: row.domain,
                    weight: row.weight,
                })
            })
            .collect::<Result<Vec<_>>>()?;

        let security_patterns = config
            .risk
            .security_patterns
            .iter()
            .map(|row| {
                Ok(SecurityPattern {
                    name: row.name.clone(),
                    regex: build_regex("risk.security_patterns", &row.pattern, false)?,
                })
            })
            .collect::<Result<Vec<_>>>()?;

        let test_markers = build_set("risk.test_markers", &config.risk.test_markers)?;
        let low_friction =
            build_set("policy.low_friction_patterns", &config.policy.low_friction_patterns)?;

        let terms = config
            .policy
            .low_signal_terms
            .iter()
            .map(|t| regex::escape(t))
            .collect::<Vec<_>>()
            .join("|");
        let low_signal = build_regex("policy.low_signal_terms", &format!("(?:{terms})"), true)?;

        let types = config
            .policy
            .commit_types
            .iter()
            .map(|t| regex::escape(t))
            .collect::<Vec<_>>()
            .join("|");
        let subject = build_regex(
            "policy.scope_pattern",
            &format!(
                r"^(?P<kind>{types})\((?P<scope>{scope})\)(?P<breaking>!)?: (?P<summary>.*)$",
                scope = config.policy.scope_pattern
            ),
            false,
        )?;

        let ticket = build_regex(
            "policy.advisories.ticket_pattern",
            &config.policy.advisories.ticket_pattern,
            false,
        )?;
        let cve = build_regex(
            "policy.advisories.cve_pattern",
            &config.policy.advisories.cve_pattern,
            true,
        )?;

        let digest = config.digest()?;
        debug!(
            digest = %digest,
            code_patterns = code_patterns.len(),
            critical_paths = config.critical_paths.len(),
            "Compiled engine configuration"
        );

        Ok(Self {
            config,
            digest,
            code_patterns,
            security_patterns,
            test_markers,
            low_friction,
            low_signal,
            subject,
            ticket,
            cve,
        })
    }

    /// The source configuration
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Content digest of the source configuration
    pub fn digest(&self) -> &str {
        &self.digest
    }

    pub fn code_patterns(&self) -> &[CodePattern] {
        &self.code_patterns
    }

    pub fn security_patterns(&self) -> &[SecurityPattern] {
        &self.security_patterns
    }

    /// Highest-weight critical-path entry matching a file, if any
    pub fn critical_path_for(&self, path: &str) -> Option<&CriticalPath> {
        self.config
            .critical_paths
            .iter()
            .filter(|c| path.contains(c.pattern.as_str()))
            .max_by(|a, b| a.weight.total_cmp(&b.weight))
    }

    /// Whether a file is non-functional (docs, tests, tooling, CI metadata)
    pub fn is_low_friction(&self, path: &str) -> bool {
        self.low_friction.is_match(path)
    }

    /// Whether a file is a test file or lives in a test directory
    pub fn is_test_path(&self, path: &str) -> bool {
        self.test_markers.is_match(path)
    }

    /// Whether a message carries no useful information
    pub fn is_low_signal(&self, message: &str) -> bool {
        let trimmed = message.trim();
        self.low_signal.is_match(trimmed)
            || self
                .config
                .policy
                .low_signal_messages
                .iter()
                .any(|m| trimmed.eq_ignore_ascii_case(m))
    }

    /// Whether the message carries the emergency bypass marker
    pub fn has_bypass_marker(&self, message: &str) -> bool {
        message
            .to_lowercase()
            .contains(&self.config.policy.bypass_marker.to_lowercase())
    }

    /// Parse a subject line as `type(scope)[!]: summary`
    pub fn parse_subject<'a>(&self, subject: &'a str) -> Option<Subject<'a>> {
        let caps = self.subject.captures(subject)?;
        Some(Subject {
            kind: caps.name("kind")?.as_str(),
            scope: caps.name("scope")?.as_str(),
            breaking: caps.name("breaking").is_some(),
            summary: caps.name("summary")?.as_str(),
        })
    }

    pub fn has_ticket_reference(&self, text: &str) -> bool {
        self.ticket.is_match(text)
    }

    pub fn has_cve_reference(&self, text: &str) -> bool {
        self.cve.is_match(text)
    }
}

impl EngineConfig {
    /// Validate and compile this configuration
    pub fn compile(self) -> Result<CompiledConfig> {
        CompiledConfig::compile(self)
    }
}

fn build_regex(table: &'static str, pattern: &str, case_insensitive: bool) -> Result<Regex> {
    RegexBuilder::new(pattern)
        .case_insensitive(case_insensitive)
        .size_limit(REGEX_SIZE_LIMIT)
        .build()
        .map_err(|e| ConfigError::InvalidPattern {
            table,
            pattern: pattern.to_string(),
            reason: e.to_string(),
        })
}

fn build_set(table: &'static str, patterns: &[String]) -> Result<RegexSet> {
    // Compile individually first so a bad row is reported by itself.
    for pattern in patterns {
        build_regex(table, pattern, false)?;
    }
    RegexSetBuilder::new(patterns)
        .size_limit(REGEX_SIZE_LIMIT * 4)
        .build()
        .map_err(|e| ConfigError::InvalidPattern {
            table,
            pattern: patterns.join(" | "),
            reason: e.to_string(),
        })
}

fn validate(config: &EngineConfig) -> Result<()> {
    check_rows("signals.paths", &config.signals.paths)?;
    check_rows("signals.imports", &config.signals.imports)?;
    check_rows("signals.code_patterns", &config.signals.code_patterns)?;
    check_rows("signals.env_vars", &config.signals.env_vars)?;

    let mut priority = config.classifier.tie_break_priority.clone();
    priority.sort();
    priority.dedup();
    if priority.len() != Domain::ALL.len()
        || config.classifier.tie_break_priority.len() != Domain::ALL.len()
    {
        return Err(ConfigError::InvalidPriority);
    }

    let mut seen = BTreeSet::new();
    for template in &config.classifier.templates {
        if !seen.insert(template.domain) {
            return Err(ConfigError::DuplicateTemplate(template.domain));
        }
        check_unit(format!("template {} threshold", template.id), template.threshold)?;
    }

    for path in &config.critical_paths {
        if path.pattern.is_empty() {
            return Err(ConfigError::EmptyTable("critical_paths.pattern"));
        }
        if path.accepted_markers.is_empty() {
            return Err(ConfigError::EmptyTable("critical_paths.accepted_markers"));
        }
        check_unit(format!("critical path {} weight", path.pattern), path.weight)?;
    }

    let risk = &config.risk;
    check_weight("risk.critical_path_base", risk.critical_path_base)?;
    check_weight("risk.security_pattern_points", risk.security_pattern_points)?;
    check_weight("risk.large_change_multiplier", risk.large_change_multiplier)?;
    check_weight("risk.medium_change_multiplier", risk.medium_change_multiplier)?;
    check_weight("risk.missing_test_multiplier", risk.missing_test_multiplier)?;
    for (domain, multiplier) in &risk.domain_multipliers {
        check_weight(format!("risk.domain_multipliers.{domain}"), *multiplier)?;
    }

    let levels = risk.levels;
    if !(0 < levels.medium
        && levels.medium < levels.high
        && levels.high < levels.critical
        && levels.critical <= 100)
    {
        return Err(ConfigError::InvalidLevelThresholds);
    }
    if risk.medium_change_lines > risk.large_change_lines {
        return Err(ConfigError::InvalidSizeThresholds);
    }

    let policy = &config.policy;
    if policy.bypass_marker.trim().is_empty() {
        return Err(ConfigError::EmptyTable("policy.bypass_marker"));
    }
    if policy.commit_types.is_empty() {
        return Err(ConfigError::EmptyTable("policy.commit_types"));
    }
    if policy.low_signal_terms.is_empty() {
        return Err(ConfigError::EmptyTable("policy.low_signal_terms"));
    }
    if policy.compliance_markers.is_empty() {
        return Err(ConfigError::EmptyTable("policy.compliance_markers"));
    }

    for path in &config.critical_paths {
        check_markers(
            policy,
            format!("critical path {} accepted_markers", path.pattern),
            &path.accepted_markers,
        )?;
    }
    for template in &config.classifier.templates {
        check_markers(
            policy,
            format!("template {} required_fields", template.id),
            &template.required_fields,
        )?;
    }

    Ok(())
}

fn check_markers(policy: &PolicyConfig, table: String, markers: &[String]) -> Result<()> {
    let known = |marker: &str| {
        policy
            .compliance_markers
            .iter()
            .any(|m| m.eq_ignore_ascii_case(marker))
    };
    match markers.iter().find(|m| !known(m.as_str())) {
        Some(marker) => Err(ConfigError::UnknownMarker {
            table,
            marker: marker.clone(),
        }),
        None => Ok(()),
    }
}

fn check_rows(table: &'static str, rows: &[WeightedPattern]) -> Result<()> {
    for row in rows {
        if row.pattern.is_empty() {
            return Err(ConfigError::EmptyTable(table));
        }
        check_weight(format!("{table} `{}`", row.pattern), row.weight)?;
    }
    Ok(())
}

fn check_weight(field: impl Into<String>, value: f64) -> Result<()> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(ConfigError::InvalidWeight {
            field: field.into(),
            value,
        })
    }
}

fn check_unit(field: impl Into<String>, value: f64) -> Result<()> {
    if (0.0..=1.0).contains(&value) {
        Ok(())
    } else {
        Err(ConfigError::ThresholdOutOfRange {
            field: field.into(),
            value,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::NamedPattern;

    fn compiled() -> CompiledConfig {
        EngineConfig::default().compile().unwrap()
    }

    #[test]
    fn test_default_config_compiles() {
        let config = compiled();
        assert_eq!(config.digest(), EngineConfig::default().digest().unwrap());
        assert_eq!(config.code_patterns().len(), 4);
        assert_eq!(config.security_patterns().len(), 5);
    }

    #[test]
    fn test_invalid_regex_names_table() {
        let mut config = EngineConfig::default();
        config
            .risk
            .security_patterns
            .push(NamedPattern::new("broken", "(unclosed"));

        match config.compile().unwrap_err() {
            ConfigError::InvalidPattern { table, pattern, .. } => {
                assert_eq!(table, "risk.security_patterns");
                assert_eq!(pattern, "(unclosed");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_threshold_out_of_range() {
        let mut config = EngineConfig::default();
        config.classifier.templates[0].threshold = 1.5;
        assert!(matches!(
            config.compile().unwrap_err(),
            ConfigError::ThresholdOutOfRange { .. }
        ));
    }

    #[test]
    fn test_negative_weight_rejected() {
        let mut config = EngineConfig::default();
        config.signals.paths[0].weight = -1.0;
        assert!(matches!(
            config.compile().unwrap_err(),
            ConfigError::InvalidWeight { .. }
        ));

        let mut config = EngineConfig::default();
        config.risk.missing_test_multiplier = f64::NAN;
        assert!(matches!(
            config.compile().unwrap_err(),
            ConfigError::InvalidWeight { .. }
        ));
    }

    #[test]
    fn test_duplicate_template_rejected() {
        let mut config = EngineConfig::default();
        let dup = config.classifier.templates[0].clone();
        config.classifier.templates.push(dup);
        assert!(matches!(
            config.compile().unwrap_err(),
            ConfigError::DuplicateTemplate(Domain::Phi)
        ));
    }

    #[test]
    fn test_priority_must_cover_every_domain() {
        let mut config = EngineConfig::default();
        config.classifier.tie_break_priority = vec![Domain::Phi, Domain::Phi, Domain::Financial];
        assert!(matches!(
            config.compile().unwrap_err(),
            ConfigError::InvalidPriority
        ));
    }

    #[test]
    fn test_level_thresholds_must_ascend() {
        let mut config = EngineConfig::default();
        config.risk.levels.high = 90;
        assert!(matches!(
            config.compile().unwrap_err(),
            ConfigError::InvalidLevelThresholds
        ));
    }

    #[test]
    fn test_empty_commit_types_rejected() {
        let mut config = EngineConfig::default();
        config.policy.commit_types.clear();
        assert!(matches!(
            config.compile().unwrap_err(),
            ConfigError::EmptyTable("policy.commit_types")
        ));
    }

    #[test]
    fn test_unrecognized_marker_rejected() {
        let mut config = EngineConfig::default();
        config.critical_paths[0].accepted_markers.push("PCI-Scope".into());
        match config.compile().unwrap_err() {
            ConfigError::UnknownMarker { table, marker } => {
                assert!(table.starts_with("critical path"));
                assert_eq!(marker, "PCI-Scope");
            }
            other => panic!("unexpected error: {other}"),
        }

        let mut config = EngineConfig::default();
        config.classifier.templates[0].required_fields.push("Risk-Owner".into());
        assert!(matches!(
            config.compile().unwrap_err(),
            ConfigError::UnknownMarker { .. }
        ));

        let mut config = EngineConfig::default();
        config.policy.compliance_markers.push("PCI-Scope".into());
        config.critical_paths[0].accepted_markers.push("pci-scope".into());
        assert!(config.compile().is_ok());
    }

    #[test]
    fn test_critical_path_prefers_highest_weight() {
        let config = compiled();
        let hit = config
            .critical_path_for("services/auth-service/patient-data/store.go")
            .unwrap();
        assert_eq!(hit.pattern, "auth-service");
        assert!(config.critical_path_for("services/web/index.ts").is_none());
    }

    #[test]
    fn test_low_friction_paths() {
        let config = compiled();
        for path in [
            "docs/architecture.md",
            "README.md",
            "services/payment-gateway/payment_test.go",
            "tests/integration/flow.py",
            "scripts/validate.sh",
            ".github/workflows/ci.yml",
            "config/app.env.example",
            "LICENSE.txt",
            "docs/notes.txt",
            "guides/onboarding.rst",
        ] {
            assert!(config.is_low_friction(path), "{path}");
        }
        for path in [
            "services/payment-gateway/payment.go",
            "src/main.rs",
            "requirements.txt",
            "services/phi-service/requirements.txt",
            "CMakeLists.txt",
        ] {
            assert!(!config.is_low_friction(path), "{path}");
        }
    }

    #[test]
    fn test_test_path_markers() {
        let config = compiled();
        assert!(config.is_test_path("services/phi-service/main_test.go"));
        assert!(config.is_test_path("tests/python/test_risk_scorer.py"));
        assert!(config.is_test_path("web/src/__tests__/app.js"));
        assert!(config.is_test_path("web/src/app.spec.ts"));
        assert!(!config.is_test_path("services/phi-service/main.go"));
        assert!(!config.is_test_path("src/contest/latest.rs"));
    }

    #[test]
    fn test_low_signal_messages() {
        let config = compiled();
        assert!(config.is_low_signal("WIP: some stuff"));
        assert!(config.is_low_signal("fix(api): temp workaround"));
        assert!(config.is_low_signal("fixup! feat(api): add route"));
        assert!(config.is_low_signal("  Update  "));
        assert!(!config.is_low_signal("docs(readme): update install steps"));
        assert!(!config.is_low_signal("feat(auth): rotate signing keys"));
    }

    #[test]
    fn test_low_signal_terms_match_inside_words() {
        let config = compiled();
        assert!(config.is_low_signal("fix(cache): tempfix stale entries"));
        assert!(config.is_low_signal("chore(ci): fixups for lint"));
        assert!(config.is_low_signal("feat(forms): add Template engine"));
    }

    #[test]
    fn test_bypass_marker_case_insensitive() {
        let config = compiled();
        assert!(config.has_bypass_marker("hotfix [SKIP-POLICY] outage"));
        assert!(!config.has_bypass_marker("skip-policy"));
    }

    #[test]
    fn test_parse_subject() {
        let config = compiled();
        let subject = config.parse_subject("feat(api)!: drop v1 routes").unwrap();
        assert_eq!(subject.kind, "feat");
        assert_eq!(subject.scope, "api");
        assert!(subject.breaking);
        assert_eq!(subject.summary, "drop v1 routes");

        assert!(config.parse_subject("feat: no scope").is_none());
        assert!(config.parse_subject("feature(api): wrong type").is_none());
        assert!(config.parse_subject("feat(API): upper scope").is_none());
    }

    #[test]
    fn test_reference_patterns() {
        let config = compiled();
        assert!(config.has_ticket_reference("Refs: PAY-1234"));
        assert!(!config.has_ticket_reference("Refs: JIRA-1234"));
        assert!(config.has_cve_reference("fixes CVE-2024-12345"));
    }
}
