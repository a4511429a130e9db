//! Hypertension risk model output.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Binary label produced by the risk model.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RiskLevel {
    High,
    Low,
}

impl fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RiskLevel::High => f.write_str("High Hypertension Risk"),
            RiskLevel::Low => f.write_str("Low Hypertension Risk"),
        }
    }
}

/// The risk model's verdict for one patient.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RiskAssessment {
    pub level: RiskLevel,
    /// Probability of the high-risk class, in percent, rounded to 2 decimals.
    pub probability: f64,
    /// Whether the blood pressure reading alone meets the clinical cut-off.
    /// Reported next to the model output; it does not influence the label.
    pub meets_bp_threshold: bool,
}

impl RiskAssessment {
    /// Build an assessment from a raw high-class probability in `[0, 1]`.
    ///
    /// The value is clamped, scaled to percent and rounded to two decimals.
    pub fn from_probability(level: RiskLevel, probability: f64, meets_bp_threshold: bool) -> Self {
        let percent = (probability.clamp(0.0, 1.0) * 100.0 * 100.0).round() / 100.0;
        Self {
            level,
            probability: percent,
            meets_bp_threshold,
        }
    }
}

impl fmt::Display for RiskAssessment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({:.2}%)", self.level, self.probability)
    }
}
