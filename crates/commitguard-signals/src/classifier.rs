//! Domain classification
//!
//! Reduces a signal vector to one dominant domain. Ties are broken by the
//! configured priority order (medical device, then PHI, then financial by
//! default). A template is attached only when confidence strictly exceeds the
//! template's threshold.

use commitguard_core::CompiledConfig;
use commitguard_types::{DomainClassification, SignalVector};
use std::sync::Arc;
use tracing::trace;

#[derive(Debug, Clone)]
pub struct DomainClassifier {
    config: Arc<CompiledConfig>,
}

impl DomainClassifier {
    pub fn new(config: Arc<CompiledConfig>) -> Self {
        Self { config }
    }

    pub fn classify(&self, signals: &SignalVector) -> DomainClassification {
        if signals.is_zero() {
            return DomainClassification::unclassified();
        }
        let total = signals.total();

        let config = self.config.config();

        // Priority order, strictly-greater replacement: earlier domains win ties.
        let mut dominant = None;
        let mut best = 0.0;
        for &domain in &config.classifier.tie_break_priority {
            let weight = signals.weight(domain);
            if weight > best {
                dominant = Some(domain);
                best = weight;
            }
        }

        let Some(domain) = dominant else {
            return DomainClassification::unclassified();
        };

        let confidence = (best / total).clamp(0.0, 1.0);
        let template = config
            .template_for(domain)
            .filter(|t| confidence > t.threshold)
            .cloned();

        trace!(
            domain = %domain,
            confidence,
            template = template.as_ref().map(|t| t.id.as_str()).unwrap_or("none"),
            "Classified commit"
        );

        DomainClassification {
            dominant_domain: Some(domain),
            confidence,
            template,
        }
    }
}
