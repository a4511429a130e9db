//! Scaler + logistic-regression hypertension model loaded from JSON.
//!
//! Artifact layout:
//!
//! ```json
//! {
//!   "features":   ["gender", "height", …, "age_years"],
//!   "scaler":     { "mean": [...11], "scale": [...11] },
//!   "classifier": { "coef": [...11], "intercept": -0.42 }
//! }
//! ```
//!
//! `features` must list exactly `RISK_FEATURES` in order; the feature order
//! is part of the artifact contract and is not reordered at load time.

use std::path::Path;

use serde::Deserialize;
use tracing::{debug, info};

use remedy_contracts::{
    error::{RemedyError, RemedyResult},
    patient::{RiskFeatures, RISK_FEATURES},
    risk::RiskLevel,
};
use remedy_core::traits::RiskModel;

/// Per-feature standardization `(x - mean) / scale`.
#[derive(Debug, Clone, Deserialize)]
pub struct StandardScaler {
    pub mean: Vec<f64>,
    pub scale: Vec<f64>,
}

impl StandardScaler {
    pub fn transform(&self, x: &[f64]) -> Vec<f64> {
        x.iter()
            .zip(self.mean.iter().zip(&self.scale))
            .map(|(v, (m, s))| {
                // Zero-variance features were fitted with unit scale.
                let s = if *s == 0.0 { 1.0 } else { *s };
                (v - m) / s
            })
            .collect()
    }
}

/// A fitted binary logistic regression.
#[derive(Debug, Clone, Deserialize)]
pub struct LogisticRegression {
    pub coef: Vec<f64>,
    pub intercept: f64,
}

impl LogisticRegression {
    pub fn decision_function(&self, x: &[f64]) -> f64 {
        self.coef.iter().zip(x).map(|(c, v)| c * v).sum::<f64>() + self.intercept
    }

    /// Probability of the positive class.
    pub fn predict_proba(&self, x: &[f64]) -> f64 {
        sigmoid(self.decision_function(x))
    }
}

fn sigmoid(z: f64) -> f64 {
    if z >= 0.0 {
        1.0 / (1.0 + (-z).exp())
    } else {
        let e = z.exp();
        e / (1.0 + e)
    }
}

#[derive(Debug, Deserialize)]
struct HypertensionArtifact {
    features: Vec<String>,
    scaler: StandardScaler,
    classifier: LogisticRegression,
}

/// The frozen hypertension risk model.
#[derive(Debug, Clone)]
pub struct HypertensionModel {
    scaler: StandardScaler,
    classifier: LogisticRegression,
}

impl HypertensionModel {
    pub fn new(scaler: StandardScaler, classifier: LogisticRegression) -> RemedyResult<Self> {
        let n = RISK_FEATURES.len();
        for (what, len) in [
            ("scaler mean", scaler.mean.len()),
            ("scaler scale", scaler.scale.len()),
            ("coefficients", classifier.coef.len()),
        ] {
            if len != n {
                return Err(RemedyError::data_unavailable(format!(
                    "hypertension model {what} has {len} entries, expected {n}"
                )));
            }
        }
        Ok(Self { scaler, classifier })
    }

    /// Parse and validate a model artifact.
    ///
    /// Returns `RemedyError::DataUnavailable` for malformed JSON, a feature
    /// list that differs from `RISK_FEATURES`, or mis-sized vectors.
    pub fn from_json_str(s: &str) -> RemedyResult<Self> {
        let artifact: HypertensionArtifact = serde_json::from_str(s).map_err(|e| {
            RemedyError::data_unavailable(format!("failed to parse hypertension model: {e}"))
        })?;

        if artifact.features.iter().map(String::as_str).ne(RISK_FEATURES.iter().copied()) {
            return Err(RemedyError::data_unavailable(format!(
                "hypertension model feature order {:?} does not match {:?}",
                artifact.features, RISK_FEATURES
            )));
        }

        Self::new(artifact.scaler, artifact.classifier)
    }

    pub fn from_file(path: &Path) -> RemedyResult<Self> {
        let contents = std::fs::read_to_string(path).map_err(|e| {
            RemedyError::data_unavailable(format!(
                "failed to read hypertension model '{}': {}",
                path.display(),
                e
            ))
        })?;
        let model = Self::from_json_str(&contents)?;
        info!(path = %path.display(), "hypertension model loaded");
        Ok(model)
    }
}

impl RiskModel for HypertensionModel {
    fn predict(&self, features: &RiskFeatures) -> RemedyResult<(RiskLevel, f64)> {
        let scaled = self.scaler.transform(features.as_slice());
        let decision = self.classifier.decision_function(&scaled);
        let probability = sigmoid(decision);
        let level = if decision > 0.0 {
            RiskLevel::High
        } else {
            RiskLevel::Low
        };

        debug!(decision, probability, ?level, "hypertension model prediction");
        Ok((level, probability))
    }
}
