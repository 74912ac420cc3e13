//! Prediction result data structures

use serde::Serialize;

/// Range displayed around a point estimate.
///
/// A fixed fraction of the estimate on each side, not a statistical interval.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ConfidenceBand {
    pub lower: f64,
    pub upper: f64,
}

impl ConfidenceBand {
    /// Band of `fraction` of the estimate below and above it
    pub fn around(estimate: f64, fraction: f64) -> Self {
        Self {
            lower: estimate * (1.0 - fraction),
            upper: estimate * (1.0 + fraction),
        }
    }
}

/// Result of one prediction request
///
/// Serializes flat: `{"estimate", "lower", "upper"}`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Prediction {
    /// Point estimate in dollars
    pub estimate: f64,
    #[serde(flatten)]
    pub band: ConfidenceBand,
}

impl Prediction {
    pub fn new(estimate: f64, band_fraction: f64) -> Self {
        Self {
            estimate,
            band: ConfidenceBand::around(estimate, band_fraction),
        }
    }
}
