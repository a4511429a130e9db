//! The consultation pipeline.
//!
//! `Advisor` drives one symptom submission through the full chain:
//!
//!   symptoms → vectorize → DiseaseClassifier → DrugSource → InteractionSource
//!
//! Request-level failures past the classifier never abort a consultation.
//! They become advisories, so the caller always has something to show.

use std::collections::BTreeSet;
use std::sync::Arc;

use chrono::Utc;
use tracing::{debug, info, warn};

use remedy_contracts::{
    advisory::{
        Advisory, DetectedInteraction, DRUG_DATA_UNAVAILABLE, INTERACTION_DATA_UNAVAILABLE,
        NO_INTERACTIONS, OUTSIDE_SCOPE, SELECT_TWO_DRUGS,
    },
    consultation::{Consultation, ConsultationId},
    error::{RemedyError, RemedyResult},
    symptom::{DiseaseLabel, SymptomCatalog},
};

use crate::{
    traits::{DiseaseClassifier, DrugSource, InteractionSource},
    vectorize::vectorize,
};

/// Convert an interaction check result into the lines shown to the user.
///
/// The output is never empty: either one warning per interacting pair, the
/// single all-clear line, or a single warning describing why the check could
/// not run.
pub fn interaction_advisories(result: RemedyResult<Vec<DetectedInteraction>>) -> Vec<Advisory> {
    match result {
        Ok(found) if found.is_empty() => vec![Advisory::info(NO_INTERACTIONS)],
        Ok(found) => found.iter().map(DetectedInteraction::to_advisory).collect(),
        Err(RemedyError::InsufficientInput { .. }) => vec![Advisory::warning(SELECT_TWO_DRUGS)],
        Err(RemedyError::DataUnavailable { reason }) => {
            warn!(%reason, "interaction check could not run");
            vec![Advisory::warning(INTERACTION_DATA_UNAVAILABLE)]
        }
        Err(other) => vec![Advisory::from_error(&other)],
    }
}

/// The symptom → disease → drugs → safety pipeline.
///
/// Holds immutable handles to the symptom catalog and the three
/// collaborators. Every call is independent; an `Advisor` can be shared
/// across threads.
pub struct Advisor {
    catalog: Arc<SymptomCatalog>,
    classifier: Box<dyn DiseaseClassifier>,
    drugs: Box<dyn DrugSource>,
    interactions: Box<dyn InteractionSource>,
}

impl Advisor {
    pub fn new(
        catalog: Arc<SymptomCatalog>,
        classifier: Box<dyn DiseaseClassifier>,
        drugs: Box<dyn DrugSource>,
        interactions: Box<dyn InteractionSource>,
    ) -> Self {
        Self {
            catalog,
            classifier,
            drugs,
            interactions,
        }
    }

    /// Predict a disease from the selected symptoms.
    ///
    /// Returns `RemedyError::InsufficientInput` for an empty selection. Names
    /// outside the catalog are ignored by the vectorizer.
    pub fn predict_disease(&self, selected: &BTreeSet<String>) -> RemedyResult<DiseaseLabel> {
        if selected.is_empty() {
            return Err(RemedyError::insufficient_input(
                "Please select at least one symptom",
            ));
        }

        let features = vectorize(selected, &self.catalog);
        if features.active_count() == 0 {
            warn!(
                selected = selected.len(),
                "none of the selected symptoms are in the catalog"
            );
        }

        let disease = self.classifier.predict(&features)?;
        debug!(
            disease = %disease,
            active_features = features.active_count(),
            "disease predicted"
        );
        Ok(disease)
    }

    /// Drugs recommended for `disease`. Empty when the disease is outside the
    /// drug table's scope.
    pub fn recommend_drugs(&self, disease: &str) -> RemedyResult<Vec<String>> {
        self.drugs.drugs_for(disease)
    }

    /// Check `drugs` for pairwise interactions and return user-facing lines.
    ///
    /// Never fails; see [`interaction_advisories`].
    pub fn check_drug_safety(&self, drugs: &[String]) -> Vec<Advisory> {
        interaction_advisories(self.interactions.find_interactions(drugs))
    }

    /// Run the whole pipeline for one symptom submission.
    ///
    /// # Errors
    ///
    /// Only an empty selection (`InsufficientInput`) or a classifier failure
    /// is returned as `Err`. Drug lookup and interaction problems are folded
    /// into `Consultation::notices` and `Consultation::safety`.
    pub fn consult(&self, symptoms: BTreeSet<String>) -> RemedyResult<Consultation> {
        let id = ConsultationId::new();
        debug!(consultation_id = %id.0, symptoms = symptoms.len(), "consultation starting");

        let disease = self.predict_disease(&symptoms)?;

        let mut notices = Vec::new();
        let drugs = match self.recommend_drugs(disease.as_str()) {
            Ok(drugs) => {
                if drugs.is_empty() {
                    info!(consultation_id = %id.0, disease = %disease, "no drugs listed for disease");
                    notices.push(Advisory::info(OUTSIDE_SCOPE));
                }
                drugs
            }
            Err(RemedyError::DataUnavailable { reason }) => {
                warn!(consultation_id = %id.0, %reason, "drug lookup failed");
                notices.push(Advisory::warning(DRUG_DATA_UNAVAILABLE));
                Vec::new()
            }
            Err(other) => {
                warn!(consultation_id = %id.0, error = %other, "drug lookup rejected");
                notices.push(Advisory::from_error(&other));
                Vec::new()
            }
        };

        let safety = self.check_drug_safety(&drugs);

        info!(
            consultation_id = %id.0,
            disease = %disease,
            drugs = drugs.len(),
            warnings = safety.iter().filter(|a| a.is_warning()).count(),
            "consultation complete"
        );

        Ok(Consultation {
            id,
            created_at: Utc::now(),
            symptoms,
            disease,
            drugs,
            notices,
            safety,
        })
    }
}

// ── Tests ────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use std::collections::{BTreeSet, HashMap};
    use std::sync::{Arc, Mutex};

    use remedy_contracts::{
        advisory::{
            DetectedInteraction, Severity, DRUG_DATA_UNAVAILABLE, INTERACTION_DATA_UNAVAILABLE,
            NO_INTERACTIONS, OUTSIDE_SCOPE, SELECT_TWO_DRUGS,
        },
        error::{RemedyError, RemedyResult},
        symptom::{DiseaseLabel, FeatureVector, SymptomCatalog},
    };

    use crate::traits::{DiseaseClassifier, DrugSource, InteractionSource};

    use super::{interaction_advisories, Advisor};

    // ── Mock helpers ─────────────────────────────────────────────────────────

    fn symptoms(names: &[&str]) -> BTreeSet<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    fn catalog() -> Arc<SymptomCatalog> {
        Arc::new(
            SymptomCatalog::new(vec!["fever".into(), "cough".into(), "fatigue".into()]).unwrap(),
        )
    }

    /// A classifier that records every vector it sees and returns a fixed label.
    struct MockClassifier {
        label: &'static str,
        seen: Arc<Mutex<Vec<FeatureVector>>>,
    }

    impl MockClassifier {
        fn new(label: &'static str) -> Self {
            Self {
                label,
                seen: Arc::new(Mutex::new(vec![])),
            }
        }
    }

    impl DiseaseClassifier for MockClassifier {
        fn predict(&self, features: &FeatureVector) -> RemedyResult<DiseaseLabel> {
            self.seen.lock().unwrap().push(features.clone());
            Ok(DiseaseLabel::new(self.label))
        }
    }

    /// A drug source backed by a fixed map, or failing on every call.
    struct MockDrugs {
        table: HashMap<&'static str, Vec<&'static str>>,
        unavailable: bool,
    }

    impl MockDrugs {
        fn with(disease: &'static str, drugs: &[&'static str]) -> Self {
            let mut table = HashMap::new();
            table.insert(disease, drugs.to_vec());
            Self {
                table,
                unavailable: false,
            }
        }

        fn empty() -> Self {
            Self {
                table: HashMap::new(),
                unavailable: false,
            }
        }

        fn unavailable() -> Self {
            Self {
                table: HashMap::new(),
                unavailable: true,
            }
        }
    }

    impl DrugSource for MockDrugs {
        fn drugs_for(&self, disease: &str) -> RemedyResult<Vec<String>> {
            if self.unavailable {
                return Err(RemedyError::data_unavailable("drug_data.csv not found"));
            }
            Ok(self
                .table
                .get(disease)
                .map(|drugs| drugs.iter().map(|d| d.to_string()).collect())
                .unwrap_or_default())
        }
    }

    /// An interaction source that flags a single fixed pair and counts calls.
    struct MockInteractions {
        pair: (&'static str, &'static str, &'static str),
        calls: Arc<Mutex<u32>>,
    }

    impl MockInteractions {
        fn new() -> Self {
            Self {
                pair: ("Aspirin", "Warfarin", "increased bleeding risk"),
                calls: Arc::new(Mutex::new(0)),
            }
        }
    }

    impl InteractionSource for MockInteractions {
        fn find_interactions(&self, drugs: &[String]) -> RemedyResult<Vec<DetectedInteraction>> {
            *self.calls.lock().unwrap() += 1;
            if drugs.len() < 2 {
                return Err(RemedyError::insufficient_input("need two drugs"));
            }
            let (a, b, desc) = self.pair;
            let mut found = Vec::new();
            for i in 0..drugs.len() {
                for j in (i + 1)..drugs.len() {
                    let (x, y) = (drugs[i].as_str(), drugs[j].as_str());
                    if (x == a && y == b) || (x == b && y == a) {
                        found.push(DetectedInteraction {
                            drug_a: x.to_string(),
                            drug_b: y.to_string(),
                            description: desc.to_string(),
                        });
                    }
                }
            }
            Ok(found)
        }
    }

    fn advisor(label: &'static str, drugs: MockDrugs) -> Advisor {
        Advisor::new(
            catalog(),
            Box::new(MockClassifier::new(label)),
            Box::new(drugs),
            Box::new(MockInteractions::new()),
        )
    }

    // ── interaction_advisories ───────────────────────────────────────────────

    #[test]
    fn empty_result_is_the_all_clear_line() {
        let lines = interaction_advisories(Ok(vec![]));
        assert_eq!(lines.len(), 1);
        assert_eq!(lines[0].severity, Severity::Info);
        assert_eq!(lines[0].message, NO_INTERACTIONS);
    }

    #[test]
    fn insufficient_input_is_one_warning() {
        let lines = interaction_advisories(Err(RemedyError::insufficient_input("one drug")));
        assert_eq!(lines.len(), 1);
        assert!(lines[0].is_warning());
        assert_eq!(lines[0].message, SELECT_TWO_DRUGS);
    }

    #[test]
    fn unavailable_table_is_one_warning() {
        let lines = interaction_advisories(Err(RemedyError::data_unavailable("missing file")));
        assert_eq!(lines.len(), 1);
        assert_eq!(lines[0].message, INTERACTION_DATA_UNAVAILABLE);
    }

    #[test]
    fn findings_never_include_the_all_clear_line() {
        let found = vec![DetectedInteraction {
            drug_a: "Aspirin".into(),
            drug_b: "Warfarin".into(),
            description: "increased bleeding risk".into(),
        }];

        let lines = interaction_advisories(Ok(found));
        assert_eq!(lines.len(), 1);
        assert!(lines.iter().all(|l| l.message != NO_INTERACTIONS));
    }

    // ── predict_disease ──────────────────────────────────────────────────────

    #[test]
    fn classifier_receives_catalog_ordered_vector() {
        let classifier = MockClassifier::new("Flu");
        let seen = Arc::clone(&classifier.seen);
        let advisor = Advisor::new(
            catalog(),
            Box::new(classifier),
            Box::new(MockDrugs::empty()),
            Box::new(MockInteractions::new()),
        );

        let label = advisor.predict_disease(&symptoms(&["fever", "fatigue"])).unwrap();

        assert_eq!(label.as_str(), "Flu");
        let seen = seen.lock().unwrap();
        assert_eq!(seen.len(), 1);
        assert_eq!(seen[0].as_slice(), &[1, 0, 1]);
    }

    #[test]
    fn empty_selection_is_rejected_before_classification() {
        let classifier = MockClassifier::new("Flu");
        let seen = Arc::clone(&classifier.seen);
        let advisor = Advisor::new(
            catalog(),
            Box::new(classifier),
            Box::new(MockDrugs::empty()),
            Box::new(MockInteractions::new()),
        );

        let result = advisor.predict_disease(&BTreeSet::new());

        assert!(matches!(result, Err(RemedyError::InsufficientInput { .. })));
        assert!(seen.lock().unwrap().is_empty(), "classifier must not be called");
    }

    // ── consult ──────────────────────────────────────────────────────────────

    #[test]
    fn consultation_reports_interacting_recommendations() {
        let advisor = advisor(
            "Flu",
            MockDrugs::with("Flu", &["Aspirin", "Warfarin", "Paracetamol"]),
        );

        let c = advisor.consult(symptoms(&["fever", "cough"])).unwrap();

        assert_eq!(c.disease.as_str(), "Flu");
        assert_eq!(c.drugs, vec!["Aspirin", "Warfarin", "Paracetamol"]);
        assert!(c.notices.is_empty());
        assert_eq!(c.safety.len(), 1);
        assert_eq!(
            c.safety[0].message,
            "⚠ Interaction between Aspirin and Warfarin: increased bleeding risk"
        );
        assert!(c.has_safety_warnings());
    }

    #[test]
    fn unknown_disease_yields_scope_notice_not_error() {
        let advisor = advisor("UnknownXYZ", MockDrugs::with("Flu", &["Aspirin"]));

        let c = advisor.consult(symptoms(&["fever"])).unwrap();

        assert!(c.drugs.is_empty());
        assert_eq!(c.notices.len(), 1);
        assert_eq!(c.notices[0].message, OUTSIDE_SCOPE);
        assert_eq!(c.notices[0].severity, Severity::Info);
        // The interaction check still runs and reports the short list.
        assert_eq!(c.safety.len(), 1);
        assert_eq!(c.safety[0].message, SELECT_TWO_DRUGS);
    }

    #[test]
    fn drug_table_failure_degrades_to_warning() {
        let advisor = advisor("Flu", MockDrugs::unavailable());

        let c = advisor.consult(symptoms(&["cough"])).unwrap();

        assert!(c.drugs.is_empty());
        assert_eq!(c.notices.len(), 1);
        assert_eq!(c.notices[0].message, DRUG_DATA_UNAVAILABLE);
        assert!(c.notices[0].is_warning());
    }

    #[test]
    fn consultation_serializes_to_json() {
        let advisor = advisor("Flu", MockDrugs::with("Flu", &["Paracetamol", "Ibuprofen"]));

        let c = advisor.consult(symptoms(&["fever"])).unwrap();
        let json = serde_json::to_value(&c).unwrap();

        assert_eq!(json["disease"], "Flu");
        assert_eq!(json["drugs"][1], "Ibuprofen");
        assert_eq!(json["safety"][0]["message"], NO_INTERACTIONS);
        assert_eq!(json["safety"][0]["severity"], "info");
    }

    #[test]
    fn repeated_lookups_are_identical() {
        let advisor = advisor("Flu", MockDrugs::with("Flu", &["Oseltamivir", "Paracetamol"]));

        let first = advisor.recommend_drugs("Flu").unwrap();
        let second = advisor.recommend_drugs("Flu").unwrap();
        assert_eq!(first, second);
    }
}
