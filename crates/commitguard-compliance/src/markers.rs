//! Compliance metadata markers
//!
//! A marker is a `Field: value` line anywhere in the commit message. Field
//! names compare case-insensitively; the value must be non-empty. When a field
//! appears more than once the first occurrence wins.

use std::collections::BTreeMap;

/// One `Field: value` line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Marker {
    /// Field name as written
    pub field: String,
    pub value: String,
}

/// Markers parsed from a commit message, keyed by lowercase field name.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MetadataMarkers {
    markers: BTreeMap<String, Marker>,
}

impl MetadataMarkers {
    pub fn parse(message: &str) -> Self {
        let mut markers = BTreeMap::new();
        for line in message.lines() {
            let Some((field, value)) = line.split_once(':') else {
                continue;
            };
            let field = field.trim();
            let value = value.trim();
            if !is_field_name(field) || value.is_empty() {
                continue;
            }
            markers
                .entry(field.to_ascii_lowercase())
                .or_insert_with(|| Marker {
                    field: field.to_string(),
                    value: value.to_string(),
                });
        }
        Self { markers }
    }

    pub fn get(&self, field: &str) -> Option<&str> {
        self.markers
            .get(&field.to_ascii_lowercase())
            .map(|m| m.value.as_str())
    }

    pub fn has(&self, field: &str) -> bool {
        self.get(field).is_some()
    }

    /// Whether any of the fields is present
    pub fn has_any<I, S>(&self, fields: I) -> bool
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        fields.into_iter().any(|f| self.has(f.as_ref()))
    }

    /// Whether the field is present with the given value (case-insensitive)
    pub fn value_is(&self, field: &str, value: &str) -> bool {
        self.get(field)
            .is_some_and(|v| v.eq_ignore_ascii_case(value))
    }

    pub fn iter(&self) -> impl Iterator<Item = &Marker> {
        self.markers.values()
    }

    pub fn len(&self) -> usize {
        self.markers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.markers.is_empty()
    }
}

// Letters, digits, '-', '_' and inner spaces ("BREAKING CHANGE").
fn is_field_name(field: &str) -> bool {
    !field.is_empty()
        && field.starts_with(|c: char| c.is_ascii_alphabetic())
        && field
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | ' '))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_fields_case_insensitive() {
        let markers = MetadataMarkers::parse(
            "feat(payment): cross-domain sync\n\nHIPAA: compliant\nphi-impact: low\n",
        );
        assert_eq!(markers.len(), 2);
        assert_eq!(markers.get("hipaa"), Some("compliant"));
        assert_eq!(markers.get("PHI-Impact"), Some("low"));
        assert!(markers.value_is("PHI-Impact", "Low"));
    }

    #[test]
    fn test_subject_is_not_a_marker() {
        let markers = MetadataMarkers::parse("feat(device): update diagnostics pipeline");
        assert!(markers.is_empty());
    }

    #[test]
    fn test_empty_value_is_ignored() {
        let markers = MetadataMarkers::parse("fix(api): x\n\nFDA:\nSOX-Control:   \n");
        assert!(!markers.has("FDA"));
        assert!(!markers.has("SOX-Control"));
    }

    #[test]
    fn test_first_occurrence_wins() {
        let markers = MetadataMarkers::parse("Clinical-Safety: High\nclinical-safety: Low");
        assert_eq!(markers.get("Clinical-Safety"), Some("High"));
    }

    #[test]
    fn test_has_any() {
        let markers = MetadataMarkers::parse("fix(pay): x\n\nSOX-Control: SOX-404-7");
        assert!(markers.has_any(["HIPAA", "SOX-Control"]));
        assert!(!markers.has_any(["FDA"]));
    }

    #[test]
    fn test_breaking_change_footer() {
        let markers = MetadataMarkers::parse("feat(api): x\n\nBREAKING CHANGE: drops v1");
        assert!(markers.has("breaking change"));
    }
}
