//! Rule evaluation context
//!
//! Everything a rule may consult, computed once per evaluation: the commit,
//! the upstream classification and risk, the parsed metadata markers and the
//! changed files that sit on a critical path.

use commitguard_core::{CompiledConfig, CriticalPath};
use commitguard_types::{CommitFacts, Domain, DomainClassification, RiskAssessment};
use std::collections::{BTreeMap, BTreeSet};

use crate::markers::MetadataMarkers;

/// A changed file on a critical path.
#[derive(Debug, Clone, Copy)]
pub struct CriticalFile<'a> {
    pub path: &'a str,
    pub entry: &'a CriticalPath,

    /// Also matches the low-friction allowlist
    pub low_friction: bool,
}

#[derive(Debug)]
pub struct RuleContext<'a> {
    pub facts: &'a CommitFacts,
    pub classification: &'a DomainClassification,
    pub risk: &'a RiskAssessment,
    pub config: &'a CompiledConfig,
    pub markers: MetadataMarkers,
    pub critical_files: Vec<CriticalFile<'a>>,
}

impl<'a> RuleContext<'a> {
    pub fn new(
        facts: &'a CommitFacts,
        classification: &'a DomainClassification,
        risk: &'a RiskAssessment,
        config: &'a CompiledConfig,
    ) -> Self {
        let critical_files = facts
            .changed_files
            .iter()
            .filter_map(|path| {
                config.critical_path_for(path).map(|entry| CriticalFile {
                    path: path.as_str(),
                    entry,
                    low_friction: config.is_low_friction(path),
                })
            })
            .collect();

        Self {
            facts,
            classification,
            risk,
            config,
            markers: MetadataMarkers::parse(&facts.message),
            critical_files,
        }
    }

    /// Critical files that still require metadata (not allowlisted)
    pub fn enforced_critical_files(&self) -> impl Iterator<Item = &CriticalFile<'a>> {
        self.critical_files.iter().filter(|f| !f.low_friction)
    }

    /// Accepted markers per critical domain touched by the commit
    pub fn critical_domains(&self) -> BTreeMap<Domain, BTreeSet<&'a str>> {
        let mut domains: BTreeMap<Domain, BTreeSet<&'a str>> = BTreeMap::new();
        for file in &self.critical_files {
            domains
                .entry(file.entry.domain)
                .or_default()
                .extend(file.entry.accepted_markers.iter().map(String::as_str));
        }
        domains
    }

    pub fn is_multi_domain(&self) -> bool {
        self.critical_domains().len() >= 2
    }

    /// Critical domains with none of their accepted markers present
    pub fn uncovered_domains(&self) -> BTreeMap<Domain, BTreeSet<&'a str>> {
        self.critical_domains()
            .into_iter()
            .filter(|(_, accepted)| !self.markers.has_any(accepted.iter()))
            .collect()
    }

    /// Cross-domain change carrying a marker for every domain it touches.
    ///
    /// Such a change is escalated on its own terms, so a single domain's
    /// template fields are not demanded on top.
    pub fn multi_domain_covered(&self) -> bool {
        self.is_multi_domain() && self.uncovered_domains().is_empty()
    }

    /// Metadata fields the message must contain
    pub fn required_metadata_fields(&self) -> BTreeSet<String> {
        let mut fields = BTreeSet::new();

        if let Some(template) = &self.classification.template {
            if !self.multi_domain_covered() {
                fields.extend(template.required_fields.iter().cloned());
            }
        }

        for file in self.enforced_critical_files() {
            fields.extend(file.entry.accepted_markers.iter().cloned());
        }

        let domains = self.critical_domains();
        if domains.len() >= 2 {
            for markers in domains.values() {
                fields.extend(markers.iter().map(|m| m.to_string()));
            }
        }

        fields
    }

    /// Template reviewers, plus the audit reviewer at HIGH and CRITICAL risk
    pub fn reviewers(&self) -> BTreeSet<String> {
        let mut reviewers: BTreeSet<String> = self
            .classification
            .template
            .iter()
            .flat_map(|t| t.reviewers.iter().cloned())
            .collect();

        if self.risk.level.requires_audit() {
            reviewers.insert(self.config.config().policy.audit_reviewer.clone());
        }

        reviewers
    }
}


#[cfg(test)]
mod tests {
    use super::fixtures::*;
    use super::*;
    use commitguard_types::RiskLevel;

    #[test]
    fn test_critical_files_flag_low_friction() {
        let config = config();
        let facts = CommitFacts::new("abc", "test(payment): cases").with_files([
            "services/payment-gateway/payment.go",
            "services/payment-gateway/payment_test.go",
            "docs/payments.md",
        ]);
        let classification = DomainClassification::unclassified();
        let risk = risk(RiskLevel::Low);
        let ctx = RuleContext::new(&facts, &classification, &risk, &config);

        assert_eq!(ctx.critical_files.len(), 2);
        assert_eq!(ctx.enforced_critical_files().count(), 1);
        assert!(!ctx.is_multi_domain());
    }

    #[test]
    fn test_required_fields_union() {
        let config = config();
        let facts = CommitFacts::new("abc", "feat(sync): x").with_files([
            "services/payment-gateway/sync.go",
            "services/auth-service/sync.go",
        ]);
        let classification = classified(&config, Domain::MedicalDevice, 0.9);
        let risk = risk(RiskLevel::Low);
        let ctx = RuleContext::new(&facts, &classification, &risk, &config);

        let fields: Vec<_> = ctx.required_metadata_fields().into_iter().collect();
        assert_eq!(
            fields,
            vec!["Clinical-Safety", "FDA", "HIPAA", "PHI-Impact", "SOX-Control"]
        );
        assert!(ctx.is_multi_domain());
    }

    #[test]
    fn test_reviewers_add_audit_team_at_high_risk() {
        let config = config();
        let facts = CommitFacts::new("abc", "feat(device): x");
        let classification = classified(&config, Domain::MedicalDevice, 1.0);

        let low = risk(RiskLevel::Medium);
        let ctx = RuleContext::new(&facts, &classification, &low, &config);
        assert!(!ctx.reviewers().contains("audit-team"));
        assert!(ctx.reviewers().contains("clinical-safety-officer"));

        let high = risk(RiskLevel::High);
        let ctx = RuleContext::new(&facts, &classification, &high, &config);
        assert!(ctx.reviewers().contains("audit-team"));
        assert!(ctx.reviewers().contains("regulatory-affairs"));
    }

    #[test]
    fn test_no_template_no_reviewers_at_low_risk() {
        let config = config();
        let facts = CommitFacts::new("abc", "docs(readme): x");
        let classification = DomainClassification::unclassified();
        let risk = risk(RiskLevel::Low);
        let ctx = RuleContext::new(&facts, &classification, &risk, &config);
        assert!(ctx.reviewers().is_empty());
    }
}
