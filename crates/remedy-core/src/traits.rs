//! Seam traits for the decision-support pipeline.
//!
//! These four traits separate the pipeline from what backs it:
//!
//! - `DiseaseClassifier`: opaque, pre-trained symptom classifier
//! - `RiskModel`:         opaque, pre-trained hypertension model (scaler included)
//! - `DrugSource`:        the disease → drug relation
//! - `InteractionSource`: the drug–drug interaction relation
//!
//! `Advisor` and `RiskAssessor` only ever talk to these traits, so tests can
//! inject fixture tables and stub models.

use remedy_contracts::{
    advisory::DetectedInteraction,
    error::RemedyResult,
    patient::RiskFeatures,
    risk::RiskLevel,
    symptom::{DiseaseLabel, FeatureVector},
};

/// A fitted classifier mapping a symptom feature vector to a disease label.
///
/// Implementations must accept vectors laid out in the exact catalog order
/// used at training time and are stateless per call.
pub trait DiseaseClassifier: Send + Sync {
    /// Predict a single disease label.
    ///
    /// Returns `RemedyError::DataUnavailable` if the vector does not have the
    /// width the model was fitted on.
    fn predict(&self, features: &FeatureVector) -> RemedyResult<DiseaseLabel>;
}

/// A fitted binary hypertension risk model.
///
/// Receives unscaled features; scaling with the frozen scaler is the
/// implementation's job. Performs no input validation, callers pass vitals
/// that already went through `PatientForm::validate`.
pub trait RiskModel: Send + Sync {
    /// Return the predicted label and the probability of the high-risk class
    /// in `[0, 1]`.
    fn predict(&self, features: &RiskFeatures) -> RemedyResult<(RiskLevel, f64)>;
}

/// The disease → drug relation.
pub trait DrugSource: Send + Sync {
    /// Drugs listed for `disease`, in table row order.
    ///
    /// - blank `disease` → `RemedyError::InvalidInput`
    /// - table unreadable or malformed → `RemedyError::DataUnavailable`
    /// - no rows for `disease` → `Ok(vec![])`
    fn drugs_for(&self, disease: &str) -> RemedyResult<Vec<String>>;
}

/// The drug–drug interaction relation.
pub trait InteractionSource: Send + Sync {
    /// Check every unordered pair of `drugs` against the relation.
    ///
    /// - fewer than two drugs → `RemedyError::InsufficientInput`
    /// - table unreadable → `RemedyError::DataUnavailable`
    /// - otherwise one `DetectedInteraction` per matching pair, in pair
    ///   enumeration order; empty when nothing matched
    fn find_interactions(&self, drugs: &[String]) -> RemedyResult<Vec<DetectedInteraction>>;
}
