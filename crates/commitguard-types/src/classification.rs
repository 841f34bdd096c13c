//! Domain classification and compliance templates

use serde::{Deserialize, Serialize};

use crate::domain::Domain;

/// A compliance template attached to a confidently classified domain.
///
/// The template names the metadata fields a commit message must carry and the
/// reviewers that own changes in the domain.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComplianceTemplate {
    /// Template identifier (e.g. `hipaa-phi`)
    pub id: String,

    /// Domain the template applies to
    pub domain: Domain,

    /// Confidence must strictly exceed this value for the template to apply
    pub threshold: f64,

    /// Metadata fields required in the commit message
    pub required_fields: Vec<String>,

    /// Reviewer identifiers assigned when the template applies
    pub reviewers: Vec<String>,
}

/// Result of reducing a [`SignalVector`](crate::SignalVector) to one domain.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DomainClassification {
    /// Dominant domain, `None` when no signal was found (serialized as `"none"`)
    #[serde(with = "dominant_domain")]
    pub dominant_domain: Option<Domain>,

    /// Dominant weight divided by the total weight, in `[0, 1]`
    pub confidence: f64,

    /// Template selected when confidence exceeds its threshold
    pub template: Option<ComplianceTemplate>,
}

impl DomainClassification {
    /// Classification for a commit without any signal
    pub fn unclassified() -> Self {
        Self {
            dominant_domain: None,
            confidence: 0.0,
            template: None,
        }
    }

    /// Label used on the wire (`phi`, `financial`, `medical_device` or `none`)
    pub fn domain_label(&self) -> &'static str {
        self.dominant_domain.map(|d| d.as_str()).unwrap_or("none")
    }

    pub fn template_id(&self) -> Option<&str> {
        self.template.as_ref().map(|t| t.id.as_str())
    }
}

mod dominant_domain {
    use super::Domain;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(value: &Option<Domain>, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(value.map(|d| d.as_str()).unwrap_or("none"))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<Domain>, D::Error> {
        let raw = String::deserialize(deserializer)?;
        match raw.as_str() {
            "none" => Ok(None),
            "phi" => Ok(Some(Domain::Phi)),
            "financial" => Ok(Some(Domain::Financial)),
            "medical_device" => Ok(Some(Domain::MedicalDevice)),
            other => Err(serde::de::Error::unknown_variant(
                other,
                &["none", "phi", "financial", "medical_device"],
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unclassified_label() {
        let c = DomainClassification::unclassified();
        assert_eq!(c.domain_label(), "none");
        assert_eq!(c.confidence, 0.0);
        assert!(c.template_id().is_none());
    }

    #[test]
    fn test_none_round_trips_as_string() {
        let c = DomainClassification::unclassified();
        let json = serde_json::to_value(&c).unwrap();
        assert_eq!(json["dominant_domain"], "none");

        let back: DomainClassification = serde_json::from_value(json).unwrap();
        assert_eq!(back.dominant_domain, None);
    }

    #[test]
    fn test_domain_label() {
        let c = DomainClassification {
            dominant_domain: Some(Domain::MedicalDevice),
            confidence: 0.9,
            template: None,
        };
        assert_eq!(c.domain_label(), "medical_device");
    }
}
