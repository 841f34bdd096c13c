//! The ordered rule set
//!
//! Precedence is fixed: the bypass and low-friction rules may allow early;
//! the remaining four always run and their deny reasons are combined.

mod bypass;
mod critical_path;
mod format;
mod low_friction;
mod low_signal;
mod multi_domain;

pub use bypass::EmergencyBypassRule;
pub use critical_path::{CriticalPathMetadataRule, MISSING_METADATA_REASON};
pub use format::{CommitFormatRule, INVALID_FORMAT_REASON};
pub use low_friction::LowFrictionRule;
pub use low_signal::{LowSignalRule, LOW_SIGNAL_REASON};
pub use multi_domain::{MultiDomainEscalationRule, MULTI_DOMAIN_REASON};

use crate::rule::PolicyRule;

/// The six rules in evaluation order
pub fn standard_rules() -> Vec<Box<dyn PolicyRule>> {
    vec![
        Box::new(EmergencyBypassRule),
        Box::new(LowFrictionRule),
        Box::new(LowSignalRule),
        Box::new(CommitFormatRule),
        Box::new(CriticalPathMetadataRule),
        Box::new(MultiDomainEscalationRule),
    ]
}
