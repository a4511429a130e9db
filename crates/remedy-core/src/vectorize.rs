//! Symptom vectorizer.

use tracing::debug;

use remedy_contracts::symptom::{FeatureVector, SymptomCatalog};

/// Turn selected symptom names into a binary feature vector in catalog order.
///
/// Position `i` is 1 iff `catalog[i]` was selected. Names the catalog does not
/// know are ignored. An empty selection yields an all-zero vector; rejecting
/// it is the caller's concern.
pub fn vectorize<I, S>(selected: I, catalog: &SymptomCatalog) -> FeatureVector
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut features = vec![0u8; catalog.len()];
    for name in selected {
        let name = name.as_ref();
        match catalog.position(name) {
            Some(idx) => features[idx] = 1,
            None => debug!(symptom = %name, "symptom not in catalog, ignored"),
        }
    }
    FeatureVector(features)
}
