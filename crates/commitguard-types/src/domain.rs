//! Regulatory domains and accumulated signal weights

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// A regulated change category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Domain {
    /// Protected health information (HIPAA)
    Phi,

    /// Payments and financial controls (SOX)
    Financial,

    /// Medical device software (FDA)
    MedicalDevice,
}

impl Domain {
    /// Every regulated domain
    pub const ALL: [Domain; 3] = [Domain::Phi, Domain::Financial, Domain::MedicalDevice];

    pub fn as_str(&self) -> &'static str {
        match self {
            Domain::Phi => "phi",
            Domain::Financial => "financial",
            Domain::MedicalDevice => "medical_device",
        }
    }
}

impl fmt::Display for Domain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Per-domain accumulated signal weight.
///
/// All weights start at zero and only ever increase.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SignalVector {
    weights: BTreeMap<Domain, f64>,
}

impl SignalVector {
    /// The all-zero vector
    pub fn zero() -> Self {
        Self {
            weights: Domain::ALL.iter().map(|d| (*d, 0.0)).collect(),
        }
    }

    /// Add weight to a domain. Negative or non-finite weights are ignored.
    pub fn add(&mut self, domain: Domain, weight: f64) {
        if !weight.is_finite() || weight <= 0.0 {
            return;
        }
        *self.weights.entry(domain).or_insert(0.0) += weight;
    }

    /// Builder form of [`SignalVector::add`]
    pub fn with(mut self, domain: Domain, weight: f64) -> Self {
        self.add(domain, weight);
        self
    }

    pub fn weight(&self, domain: Domain) -> f64 {
        self.weights.get(&domain).copied().unwrap_or(0.0)
    }

    /// Sum of all domain weights
    pub fn total(&self) -> f64 {
        self.weights.values().sum()
    }

    pub fn is_zero(&self) -> bool {
        self.total() == 0.0
    }

    /// Iterate over (domain, weight) in domain order
    pub fn iter(&self) -> impl Iterator<Item = (Domain, f64)> + '_ {
        self.weights.iter().map(|(d, w)| (*d, *w))
    }
}

impl Default for SignalVector {
    fn default() -> Self {
        Self::zero()
    }
}
