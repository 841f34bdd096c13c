use std::collections::BTreeMap;

use crate::context::RuleContext;
use crate::rule::{PolicyRule, RuleOutcome};

pub const MISSING_METADATA_REASON: &str = "missing compliance metadata";

/// Rule 5: critical-path changes must carry a compliance marker.
///
/// Every critical file that is not allowlisted needs at least one of its
/// path's accepted markers. When the classifier selected a template, all of
/// the template's required fields must be present as well, unless the change
/// spans several critical domains and carries a marker for each of them.
#[derive(Debug, Default)]
pub struct CriticalPathMetadataRule;

impl PolicyRule for CriticalPathMetadataRule {
    fn id(&self) -> &str {
        "critical-path-metadata"
    }

    fn name(&self) -> &str {
        "Critical-Path Metadata"
    }

    fn description(&self) -> &str {
        "Requires a compliance marker for critical-path changes and the selected template fields"
    }

    fn evaluate(&self, ctx: &RuleContext<'_>) -> RuleOutcome {
        let mut reasons = Vec::new();

        // Group offending files by the marker set they accept.
        let mut missing: BTreeMap<Vec<&str>, Vec<&str>> = BTreeMap::new();
        for file in ctx.enforced_critical_files() {
            if !ctx.markers.has_any(&file.entry.accepted_markers) {
                let accepted = file
                    .entry
                    .accepted_markers
                    .iter()
                    .map(String::as_str)
                    .collect();
                missing.entry(accepted).or_default().push(file.path);
            }
        }
        for (accepted, files) in missing {
            reasons.push(format!(
                "{MISSING_METADATA_REASON}: one of [{}] required for {}",
                accepted.join(", "),
                files.join(", ")
            ));
        }

        if let Some(template) = ctx
            .classification
            .template
            .as_ref()
            .filter(|_| !ctx.multi_domain_covered())
        {
            let absent: Vec<&str> = template
                .required_fields
                .iter()
                .filter(|f| !ctx.markers.has(f))
                .map(String::as_str)
                .collect();
            if !absent.is_empty() {
                reasons.push(format!(
                    "{MISSING_METADATA_REASON}: {} template requires [{}]",
                    template.id,
                    absent.join(", ")
                ));
            }
        }

        if reasons.is_empty() {
            RuleOutcome::Pass
        } else {
            RuleOutcome::Deny(reasons)
        }
    }
}
