//! Built-in reference tables

use commitguard_types::{ComplianceTemplate, Domain};
use std::collections::BTreeMap;

use crate::config::{
    AdvisoryConfig, ClassifierConfig, CriticalPath, EngineConfig, LevelThresholds, NamedPattern,
    PolicyConfig, RiskConfig, SignalTables, WeightedPattern,
};

pub const HIPAA: &str = "HIPAA";
pub const PHI_IMPACT: &str = "PHI-Impact";
pub const CLINICAL_SAFETY: &str = "Clinical-Safety";
pub const FDA: &str = "FDA";
pub const SOX_CONTROL: &str = "SOX-Control";

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            signals: SignalTables::default(),
            classifier: ClassifierConfig::default(),
            critical_paths: default_critical_paths(),
            risk: RiskConfig::default(),
            policy: PolicyConfig::default(),
        }
    }
}

fn default_critical_paths() -> Vec<CriticalPath> {
    vec![
        CriticalPath::new("payment-gateway", Domain::Financial, 0.90, [SOX_CONTROL, HIPAA]),
        CriticalPath::new("auth-service", Domain::Phi, 0.85, [HIPAA, PHI_IMPACT]),
        CriticalPath::new("phi-service", Domain::Phi, 0.80, [HIPAA, PHI_IMPACT]),
        CriticalPath::new("patient-data", Domain::Phi, 0.80, [HIPAA, PHI_IMPACT]),
        CriticalPath::new("medical-device", Domain::MedicalDevice, 0.95, [FDA]),
    ]
}

impl Default for SignalTables {
    fn default() -> Self {
        use Domain::*;

        Self {
            paths: vec![
                WeightedPattern::new("phi-service", Phi, 10.0),
                WeightedPattern::new("auth-service", Phi, 10.0),
                WeightedPattern::new("patient-data", Phi, 10.0),
                WeightedPattern::new("payment-gateway", Financial, 10.0),
                WeightedPattern::new("medical-device", MedicalDevice, 10.0),
            ],
            imports: vec![
                WeightedPattern::new("crypto/aes", Phi, 8.0),
                WeightedPattern::new("crypto/cipher", Phi, 8.0),
                WeightedPattern::new("golang.org/x/crypto", Phi, 8.0),
                WeightedPattern::new("cryptography.hazmat", Phi, 8.0),
                WeightedPattern::new("stripe-go", Financial, 7.0),
                WeightedPattern::new("import stripe", Financial, 7.0),
                WeightedPattern::new("braintree", Financial, 7.0),
                WeightedPattern::new("device-controller", MedicalDevice, 9.0),
                WeightedPattern::new("DeviceController", MedicalDevice, 9.0),
            ],
            code_patterns: vec![
                WeightedPattern::new(r"\b(patient|mrn|medical_record|ssn)", Phi, 5.0),
                WeightedPattern::new(r"\b(en|de)crypt", Phi, 4.0),
                WeightedPattern::new(r"\b(billing|invoice|payment)", Financial, 5.0),
                WeightedPattern::new(r"\b(diagnos|therap|dosage)", MedicalDevice, 6.0),
            ],
            env_vars: vec![
                WeightedPattern::new("PHI_ENCRYPTION_KEY", Phi, 6.0),
                WeightedPattern::new("PAYMENT_API_KEY", Financial, 6.0),
                WeightedPattern::new("STRIPE_SECRET_KEY", Financial, 6.0),
                WeightedPattern::new("DEVICE_REGISTRATION_ID", MedicalDevice, 7.0),
            ],
        }
    }
}

impl Default for ClassifierConfig {
    fn default() -> Self {
        Self {
            tie_break_priority: vec![Domain::MedicalDevice, Domain::Phi, Domain::Financial],
            templates: vec![
                ComplianceTemplate {
                    id: "hipaa-phi".into(),
                    domain: Domain::Phi,
                    threshold: 0.70,
                    required_fields: vec![HIPAA.into(), PHI_IMPACT.into()],
                    reviewers: vec!["privacy-officer".into(), "security-team".into()],
                },
                ComplianceTemplate {
                    id: "sox-financial".into(),
                    domain: Domain::Financial,
                    threshold: 0.60,
                    required_fields: vec![SOX_CONTROL.into()],
                    reviewers: vec!["finance-compliance".into(), "security-team".into()],
                },
                ComplianceTemplate {
                    id: "fda-device".into(),
                    domain: Domain::MedicalDevice,
                    threshold: 0.80,
                    required_fields: vec![FDA.into(), CLINICAL_SAFETY.into()],
                    reviewers: vec![
                        "clinical-safety-officer".into(),
                        "regulatory-affairs".into(),
                    ],
                },
            ],
        }
    }
}

impl Default for RiskConfig {
    fn default() -> Self {
        Self {
            critical_path_base: 40.0,
            security_patterns: vec![
                NamedPattern::new(
                    "crypto_call",
                    r"(?i)\b(aes|cipher|hmac|bcrypt|argon2|pbkdf2|rsa|sha256)\b",
                ),
                NamedPattern::new("password", r"(?i)passw(or)?d"),
                NamedPattern::new("secret", r"(?i)secret"),
                NamedPattern::new("private_key", r"(?i)private[_-]?key"),
                NamedPattern::new("session", r"(?i)\bsession"),
            ],
            security_pattern_points: 8.0,
            large_change_lines: 100,
            large_change_multiplier: 1.30,
            medium_change_lines: 50,
            medium_change_multiplier: 1.15,
            domain_multipliers: BTreeMap::from([
                (Domain::MedicalDevice, 1.50),
                (Domain::Phi, 1.30),
                (Domain::Financial, 1.20),
            ]),
            test_markers: vec![
                r"(^|/)tests?/".into(),
                r"(^|/)__tests__/".into(),
                r"_test\.[A-Za-z0-9]+$".into(),
                r"(^|/)test_[^/]*$".into(),
                r"\.(test|spec)\.[A-Za-z0-9]+$".into(),
            ],
            missing_test_multiplier: 1.20,
            levels: LevelThresholds {
                critical: 80,
                high: 60,
                medium: 30,
            },
        }
    }
}

impl Default for AdvisoryConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            ticket_pattern: r"\b(EHR|PAY|DEV|SEC|COMP)-\d+\b".into(),
            cve_pattern: r"\bCVE-\d{4}-\d{4,}\b".into(),
            metadata_values: BTreeMap::from([
                (
                    HIPAA.to_string(),
                    vec!["Applicable".into(), "Not Applicable".into(), "Compliant".into()],
                ),
                (
                    PHI_IMPACT.to_string(),
                    vec![
                        "Direct".into(),
                        "Indirect".into(),
                        "None".into(),
                        "Low".into(),
                        "Medium".into(),
                        "High".into(),
                    ],
                ),
                (
                    CLINICAL_SAFETY.to_string(),
                    vec![
                        "Critical".into(),
                        "High".into(),
                        "Medium".into(),
                        "Low".into(),
                        "None".into(),
                    ],
                ),
            ]),
        }
    }
}

impl Default for PolicyConfig {
    fn default() -> Self {
        Self {
            bypass_marker: "[skip-policy]".into(),
            low_friction_patterns: vec![
                r"(^|/)docs?/".into(),
                r"\.(md|markdown|rst|adoc)$".into(),
                r"(^|/)(README|LICENSE|CHANGELOG|CONTRIBUTING|CODEOWNERS)[^/]*$".into(),
                r"(^|/)tests?/".into(),
                r"(^|/)__tests__/".into(),
                r"_test\.[A-Za-z0-9]+$".into(),
                r"(^|/)test_[^/]*\.py$".into(),
                r"\.(test|spec)\.[A-Za-z0-9]+$".into(),
                r"(^|/)scripts/".into(),
                r"(^|/)tools/".into(),
                r"(^|/)examples?/".into(),
                r"\.(example|sample)$".into(),
                r"(^|/)\.github/".into(),
                r"(^|/)\.gitlab-ci\.ya?ml$".into(),
                r"(^|/)\.(gitignore|gitattributes|editorconfig)$".into(),
            ],
            low_signal_terms: vec!["wip".into(), "temp".into(), "fixup".into()],
            low_signal_messages: vec!["update".into()],
            commit_types: [
                "feat", "fix", "perf", "security", "docs", "refactor", "chore", "test", "ci",
                "build", "style", "breaking",
            ]
            .iter()
            .map(|t| t.to_string())
            .collect(),
            scope_pattern: r"[a-z][a-z0-9._/-]*".into(),
            max_subject_length: 100,
            compliance_markers: vec![
                HIPAA.into(),
                PHI_IMPACT.into(),
                CLINICAL_SAFETY.into(),
                FDA.into(),
                SOX_CONTROL.into(),
            ],
            audit_reviewer: "audit-team".into(),
            advisories: AdvisoryConfig::default(),
        }
    }
}
