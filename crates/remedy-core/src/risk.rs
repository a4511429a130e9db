//! The hypertension risk pipeline.
//!
//! Independent of the symptom pipeline: it shares no state with `Advisor`.
//! The assessor validates the form, encodes the vitals in the fixed feature
//! order, and hands them to the frozen model.

use tracing::{debug, info};

use remedy_contracts::{
    error::RemedyResult,
    patient::PatientForm,
    risk::RiskAssessment,
};

use crate::traits::RiskModel;

pub struct RiskAssessor {
    model: Box<dyn RiskModel>,
}

impl RiskAssessor {
    pub fn new(model: Box<dyn RiskModel>) -> Self {
        Self { model }
    }

    /// Assess one patient.
    ///
    /// # Errors
    ///
    /// `InsufficientInput` for unfilled fields and `InvalidInput` for
    /// out-of-range or inconsistent readings; the model is not consulted in
    /// either case. Model failures propagate unchanged.
    pub fn assess(&self, form: &PatientForm) -> RemedyResult<RiskAssessment> {
        let vitals = form.validate().inspect_err(|e| {
            debug!(error = %e, "patient form rejected");
        })?;

        let (level, probability) = self.model.predict(&vitals.features())?;
        let assessment = RiskAssessment::from_probability(
            level,
            probability,
            vitals.meets_hypertension_threshold(),
        );

        info!(
            level = ?assessment.level,
            probability = assessment.probability,
            systolic = vitals.systolic(),
            diastolic = vitals.diastolic(),
            "risk assessed"
        );
        Ok(assessment)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use remedy_contracts::{
        error::{RemedyError, RemedyResult},
        patient::{Gender, Level, PatientForm, RiskFeatures},
        risk::RiskLevel,
    };

    use crate::traits::RiskModel;

    use super::RiskAssessor;

    /// A model that returns a fixed probability and records its inputs.
    struct MockModel {
        probability: f64,
        calls: Arc<Mutex<Vec<RiskFeatures>>>,
    }

    impl RiskModel for MockModel {
        fn predict(&self, features: &RiskFeatures) -> RemedyResult<(RiskLevel, f64)> {
            self.calls.lock().unwrap().push(*features);
            let level = if self.probability > 0.5 {
                RiskLevel::High
            } else {
                RiskLevel::Low
            };
            Ok((level, self.probability))
        }
    }

    fn assessor(probability: f64) -> (RiskAssessor, Arc<Mutex<Vec<RiskFeatures>>>) {
        let calls = Arc::new(Mutex::new(vec![]));
        let model = MockModel {
            probability,
            calls: Arc::clone(&calls),
        };
        (RiskAssessor::new(Box::new(model)), calls)
    }

    fn form() -> PatientForm {
        PatientForm {
            age_years: 61,
            height_cm: 165,
            weight_kg: 90,
            systolic: 150,
            diastolic: 95,
            gender: Some(Gender::Male),
            cholesterol: Some(Level::WellAboveNormal),
            glucose: Some(Level::AboveNormal),
            smoker: Some(true),
            alcohol: Some(false),
            active: Some(false),
        }
    }

    #[test]
    fn valid_form_reaches_model_in_feature_order() {
        let (assessor, calls) = assessor(0.9123);

        let assessment = assessor.assess(&form()).unwrap();

        assert_eq!(assessment.level, RiskLevel::High);
        assert_eq!(assessment.probability, 91.23);
        assert!(assessment.meets_bp_threshold);

        let calls = calls.lock().unwrap();
        assert_eq!(calls.len(), 1);
        assert_eq!(
            calls[0].as_slice(),
            &[2.0, 165.0, 90.0, 150.0, 95.0, 3.0, 2.0, 1.0, 0.0, 0.0, 61.0]
        );
    }

    #[test]
    fn invalid_form_never_reaches_model() {
        let (assessor, calls) = assessor(0.2);
        let bad = PatientForm {
            diastolic: 160,
            ..form()
        };

        let result = assessor.assess(&bad);

        assert!(matches!(result, Err(RemedyError::InvalidInput { .. })));
        assert!(calls.lock().unwrap().is_empty());
    }

    #[test]
    fn incomplete_form_is_insufficient() {
        let (assessor, _) = assessor(0.2);
        let result = assessor.assess(&PatientForm::default());
        assert!(matches!(result, Err(RemedyError::InsufficientInput { .. })));
    }
}
