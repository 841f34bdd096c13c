//! Signal extraction
//!
//! Four independent sources write into one per-domain accumulator:
//! changed-file paths, import/SDK substrings, code-pattern regexes and
//! environment variable names. Every source only adds weight, so the order in
//! which they run does not affect the result.

use commitguard_core::CompiledConfig;
use commitguard_types::{CommitFacts, Domain, SignalVector};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::trace;

/// Facet of the commit a signal was found in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SignalSource {
    Path,
    Import,
    CodePattern,
    EnvVar,
}

/// One table row that matched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SignalHit {
    pub source: SignalSource,
    pub pattern: String,
    pub domain: Domain,
    pub weight: f64,

    /// Changed file the hit came from (path signals only)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file: Option<String>,
}

/// Extracted weights plus the rows that produced them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SignalExtraction {
    pub vector: SignalVector,
    pub hits: Vec<SignalHit>,
}

impl SignalExtraction {
    fn new() -> Self {
        Self {
            vector: SignalVector::zero(),
            hits: Vec::new(),
        }
    }

    fn record(
        &mut self,
        source: SignalSource,
        pattern: &str,
        domain: Domain,
        weight: f64,
        file: Option<&str>,
    ) {
        self.vector.add(domain, weight);
        self.hits.push(SignalHit {
            source,
            pattern: pattern.to_string(),
            domain,
            weight,
            file: file.map(str::to_string),
        });
    }
}

/// Scans commit facts against the configured signal tables.
#[derive(Debug, Clone)]
pub struct SignalExtractor {
    config: Arc<CompiledConfig>,
}

impl SignalExtractor {
    pub fn new(config: Arc<CompiledConfig>) -> Self {
        Self { config }
    }

    /// Per-domain signal weights. Never fails; no match yields the zero vector.
    pub fn extract(&self, facts: &CommitFacts) -> SignalVector {
        self.extract_detailed(facts).vector
    }

    /// Signal weights together with every matching table row
    pub fn extract_detailed(&self, facts: &CommitFacts) -> SignalExtraction {
        let tables = &self.config.config().signals;
        let diff = facts.diff_text.as_str();
        let mut out = SignalExtraction::new();

        for file in &facts.changed_files {
            for row in tables.paths.iter().filter(|r| file.contains(r.pattern.as_str())) {
                out.record(SignalSource::Path, &row.pattern, row.domain, row.weight, Some(file));
            }
        }

        if !diff.is_empty() {
            for row in tables.imports.iter().filter(|r| diff.contains(r.pattern.as_str())) {
                out.record(SignalSource::Import, &row.pattern, row.domain, row.weight, None);
            }

            for row in self
                .config
                .code_patterns()
                .iter()
                .filter(|r| r.regex.is_match(diff))
            {
                out.record(
                    SignalSource::CodePattern,
                    row.regex.as_str(),
                    row.domain,
                    row.weight,
                    None,
                );
            }

            for row in tables.env_vars.iter().filter(|r| diff.contains(r.pattern.as_str())) {
                out.record(SignalSource::EnvVar, &row.pattern, row.domain, row.weight, None);
            }
        }

        trace!(sha = %facts.sha, hits = out.hits.len(), "Extracted signals");
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use commitguard_core::EngineConfig;

    fn extractor() -> SignalExtractor {
        SignalExtractor::new(Arc::new(EngineConfig::default().compile().unwrap()))
    }

    #[test]
    fn test_unmatched_commit_is_zero() {
        let facts = CommitFacts::new("abc", "chore(web): bump deps")
            .with_file("web/package.json")
            .with_diff("+\"left-pad\": \"1.3.0\"");
        let vector = extractor().extract(&facts);
        assert!(vector.is_zero());
    }

    #[test]
    fn test_path_signals_per_file() {
        let facts = CommitFacts::new("abc", "feat(auth): login")
            .with_files(["services/auth-service/main.go", "services/auth-service/jwt.go"])
            .with_file("services/payment-gateway/payment.go");
        let vector = extractor().extract(&facts);
        assert_eq!(vector.weight(Domain::Phi), 20.0);
        assert_eq!(vector.weight(Domain::Financial), 10.0);
        assert_eq!(vector.weight(Domain::MedicalDevice), 0.0);
    }

    #[test]
    fn test_import_counts_once_per_pattern() {
        let diff = "+import \"crypto/aes\"\n+import \"crypto/aes\"\n";
        let facts = CommitFacts::new("abc", "feat(crypto): aes").with_diff(diff);
        let extraction = extractor().extract_detailed(&facts);
        assert_eq!(extraction.vector.weight(Domain::Phi), 8.0);
        assert_eq!(extraction.hits.len(), 1);
        assert_eq!(extraction.hits[0].source, SignalSource::Import);
    }

    #[test]
    fn test_code_patterns_case_insensitive() {
        let diff = "+func load(patient Patient) {}\n+// Decrypt record\n";
        let facts = CommitFacts::new("abc", "feat(phi): load").with_diff(diff);
        let vector = extractor().extract(&facts);
        // patient identifiers (+5) and encryption verbs (+4)
        assert_eq!(vector.weight(Domain::Phi), 9.0);
    }

    #[test]
    fn test_env_var_signals() {
        let diff = "+key := os.Getenv(\"STRIPE_SECRET_KEY\")\n+id := os.Getenv(\"DEVICE_REGISTRATION_ID\")\n";
        let facts = CommitFacts::new("abc", "feat(cfg): env").with_diff(diff);
        let vector = extractor().extract(&facts);
        assert_eq!(vector.weight(Domain::Financial), 6.0);
        assert_eq!(vector.weight(Domain::MedicalDevice), 7.0);
    }

    #[test]
    fn test_all_sources_accumulate() {
        let diff = "+import \"github.com/acme/medical-device/controller\"\n\
                    +dc := DeviceController{}\n\
                    +dc.Apply(dosage)\n";
        let facts = CommitFacts::new("abc", "feat(device): dosage")
            .with_file("services/medical-device/dosage.go")
            .with_diff(diff);
        let vector = extractor().extract(&facts);
        // path (+10), device-controller API (+9), dosage terms (+6)
        assert_eq!(vector.weight(Domain::MedicalDevice), 25.0);
    }
}
