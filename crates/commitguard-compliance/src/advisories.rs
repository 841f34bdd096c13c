//! Non-blocking advisories
//!
//! Observations a reviewer should see but that never change the outcome:
//! missing CVE or ticket references, breaking changes, unrecognized metadata
//! values and declared impact levels that contradict the changed paths.

use commitguard_core::defaults::{CLINICAL_SAFETY, PHI_IMPACT};
use commitguard_types::Domain;

use crate::context::RuleContext;

const BREAKING_FOOTER: &str = "BREAKING CHANGE";

pub fn collect(ctx: &RuleContext<'_>) -> Vec<String> {
    let settings = &ctx.config.config().policy.advisories;
    if !settings.enabled {
        return Vec::new();
    }

    let message = &ctx.facts.message;
    let subject = ctx.config.parse_subject(ctx.facts.subject());
    let mut advisories = Vec::new();

    if subject.as_ref().is_some_and(|s| s.kind == "security")
        && !ctx.config.has_cve_reference(message)
    {
        advisories.push("security change without a CVE reference".to_string());
    }

    if subject.as_ref().is_some_and(|s| s.breaking) || message.contains(BREAKING_FOOTER) {
        advisories.push("breaking change: dual approval required before merge".to_string());
    }

    if !ctx.config.has_ticket_reference(message) {
        advisories.push("no ticket reference found".to_string());
    }

    for (field, allowed) in &settings.metadata_values {
        if let Some(value) = ctx.markers.get(field) {
            if !allowed.iter().any(|a| a.eq_ignore_ascii_case(value)) {
                advisories.push(format!(
                    "{field} value `{value}` is not one of: {}",
                    allowed.join(", ")
                ));
            }
        }
    }

    if ctx.markers.value_is(PHI_IMPACT, "Direct") && ctx.markers.value_is(CLINICAL_SAFETY, "Low") {
        advisories.push(format!(
            "{PHI_IMPACT}: Direct with {CLINICAL_SAFETY}: Low; confirm the safety classification"
        ));
    }

    let domains = ctx.critical_domains();
    if ctx.markers.value_is(PHI_IMPACT, "None") && domains.contains_key(&Domain::Phi) {
        advisories.push(format!("{PHI_IMPACT} declared None but a PHI path changed"));
    }
    if ctx.markers.value_is(CLINICAL_SAFETY, "None") && domains.contains_key(&Domain::MedicalDevice)
    {
        advisories.push(format!(
            "{CLINICAL_SAFETY} declared None but a medical-device path changed"
        ));
    }

    advisories
}
