//! Engine configuration
//!
//! Every weight, threshold and pattern the pipeline consults lives here as a
//! plain table of rows. Adding a pattern is a table edit, never a branch edit.
//! The built-in reference tables are provided by [`EngineConfig::default`];
//! an operator may replace any section from a YAML document.

use commitguard_types::{ComplianceTemplate, Domain};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

use crate::error::{ConfigError, Result};

/// A pattern contributing weight to one domain.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeightedPattern {
    pub pattern: String,
    pub domain: Domain,
    pub weight: f64,
}

impl WeightedPattern {
    pub fn new(pattern: impl Into<String>, domain: Domain, weight: f64) -> Self {
        Self {
            pattern: pattern.into(),
            domain,
            weight,
        }
    }
}

/// A named regular expression.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NamedPattern {
    pub name: String,
    pub pattern: String,
}

impl NamedPattern {
    pub fn new(name: impl Into<String>, pattern: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            pattern: pattern.into(),
        }
    }
}

/// A changed-file location carrying elevated regulatory or safety risk.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CriticalPath {
    /// Substring matched against the changed file path
    pub pattern: String,

    pub domain: Domain,

    /// Path-specific risk weight in `[0, 1]`
    pub weight: f64,

    /// Metadata markers, any one of which satisfies the path's requirement
    pub accepted_markers: Vec<String>,
}

impl CriticalPath {
    pub fn new<I, S>(pattern: impl Into<String>, domain: Domain, weight: f64, markers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            pattern: pattern.into(),
            domain,
            weight,
            accepted_markers: markers.into_iter().map(Into::into).collect(),
        }
    }
}

/// Signal extraction tables, one per commit facet.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SignalTables {
    /// Substrings matched against each changed file path
    pub paths: Vec<WeightedPattern>,

    /// Substrings matched against the diff (library / SDK usage)
    pub imports: Vec<WeightedPattern>,

    /// Case-insensitive regular expressions matched against the diff
    pub code_patterns: Vec<WeightedPattern>,

    /// Literal environment variable names matched against the diff
    pub env_vars: Vec<WeightedPattern>,
}

/// Domain classifier settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClassifierConfig {
    /// Tie-break order, highest priority first
    pub tie_break_priority: Vec<Domain>,

    /// At most one template per domain
    pub templates: Vec<ComplianceTemplate>,
}

/// Lower bounds (inclusive) of each risk level.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LevelThresholds {
    pub critical: u8,
    pub high: u8,
    pub medium: u8,
}

/// Risk scorer settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RiskConfig {
    /// Points per critical file before its path weight is applied
    pub critical_path_base: f64,

    /// Security-sensitive diff patterns, each counted once
    pub security_patterns: Vec<NamedPattern>,

    /// Points added per distinct security pattern found
    pub security_pattern_points: f64,

    /// Changes with more changed lines than this are large
    pub large_change_lines: usize,
    pub large_change_multiplier: f64,

    /// Changes with at least this many changed lines are medium
    pub medium_change_lines: usize,
    pub medium_change_multiplier: f64,

    /// Amplification applied for the dominant domain
    pub domain_multipliers: BTreeMap<Domain, f64>,

    /// Regular expressions identifying test files or directories
    pub test_markers: Vec<String>,

    /// Multiplier applied when no changed file is a test
    pub missing_test_multiplier: f64,

    pub levels: LevelThresholds,
}

/// Non-blocking advisory checks.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AdvisoryConfig {
    pub enabled: bool,

    /// Regular expression recognizing a ticket reference
    pub ticket_pattern: String,

    /// Regular expression recognizing a CVE reference
    pub cve_pattern: String,

    /// Allowed values per metadata field (compared case-insensitively)
    pub metadata_values: BTreeMap<String, Vec<String>>,
}

/// Policy evaluator settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PolicyConfig {
    /// Case-insensitive literal that bypasses every rule
    pub bypass_marker: String,

    /// Regular expressions for non-functional files exempt from metadata rules
    pub low_friction_patterns: Vec<String>,

    /// Words that make a message low-signal anywhere in it
    pub low_signal_terms: Vec<String>,

    /// Whole messages that are low-signal on their own
    pub low_signal_messages: Vec<String>,

    /// Allowed conventional-commit types
    pub commit_types: Vec<String>,

    /// Regular expression for the scope token
    pub scope_pattern: String,

    pub max_subject_length: usize,

    /// Every recognized compliance metadata field name. Critical-path markers
    /// and template fields must be drawn from this list.
    pub compliance_markers: Vec<String>,

    /// Reviewer added for HIGH and CRITICAL risk
    pub audit_reviewer: String,

    pub advisories: AdvisoryConfig,
}

/// Complete engine configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub signals: SignalTables,
    pub classifier: ClassifierConfig,

    /// Shared by the risk scorer and the critical-path policy rules
    pub critical_paths: Vec<CriticalPath>,

    pub risk: RiskConfig,
    pub policy: PolicyConfig,
}

impl EngineConfig {
    /// Parse a configuration document; absent sections keep their defaults
    pub fn from_yaml_str(yaml: &str) -> Result<Self> {
        Ok(serde_yaml::from_str(yaml)?)
    }

    /// Load configuration from a YAML file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_yaml_str(&contents)
    }

    /// Load from a file when given, otherwise use the built-in tables
    pub fn load(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::from_file(path),
            None => Ok(Self::default()),
        }
    }

    pub fn to_yaml(&self) -> Result<String> {
        Ok(serde_yaml::to_string(self)?)
    }

    /// Template configured for a domain
    pub fn template_for(&self, domain: Domain) -> Option<&ComplianceTemplate> {
        self.classifier.templates.iter().find(|t| t.domain == domain)
    }

    /// Content digest of the configuration, stable across runs
    pub fn digest(&self) -> Result<String> {
        let canonical =
            serde_json::to_vec(self).map_err(|e| ConfigError::Serialize(e.to_string()))?;
        Ok(blake3::hash(&canonical).to_hex().to_string())
    }
}
