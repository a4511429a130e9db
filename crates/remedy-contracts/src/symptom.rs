//! Symptom catalog, feature vector, and disease label types.
//!
//! The catalog's order is a hard contract with the disease classifier: feature
//! position `i` always means `catalog[i]`, exactly as it did at training time.

use std::collections::HashMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{RemedyError, RemedyResult};

/// The ordered, duplicate-free list of symptom names the classifier was
/// trained on.
///
/// Built once at startup and never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct SymptomCatalog {
    names: Vec<String>,
    #[serde(skip)]
    positions: HashMap<String, usize>,
}

impl SymptomCatalog {
    /// Build a catalog from names in feature order.
    ///
    /// Returns `RemedyError::DataUnavailable` if a name appears twice, since a
    /// duplicated column would make the feature layout ambiguous.
    pub fn new(names: Vec<String>) -> RemedyResult<Self> {
        let mut positions = HashMap::with_capacity(names.len());
        for (idx, name) in names.iter().enumerate() {
            if positions.insert(name.clone(), idx).is_some() {
                return Err(RemedyError::data_unavailable(format!(
                    "symptom catalog lists '{name}' more than once"
                )));
            }
        }
        Ok(Self { names, positions })
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// Feature position of `name`, if it is part of the catalog.
    pub fn position(&self, name: &str) -> Option<usize> {
        self.positions.get(name).copied()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.positions.contains_key(name)
    }

    /// Symptom names in feature order.
    pub fn names(&self) -> &[String] {
        &self.names
    }
}

impl<'de> Deserialize<'de> for SymptomCatalog {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let names = Vec::<String>::deserialize(deserializer)?;
        SymptomCatalog::new(names).map_err(|e| serde::de::Error::custom(e.reason()))
    }
}

/// A binary feature vector, one entry per catalog symptom, in catalog order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FeatureVector(pub Vec<u8>);

impl FeatureVector {
    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn as_slice(&self) -> &[u8] {
        &self.0
    }

    /// Number of positions set to 1.
    pub fn active_count(&self) -> usize {
        self.0.iter().filter(|&&v| v == 1).count()
    }
}

/// A disease identifier as returned by the classifier.
///
/// Deliberately not an enum: a label unknown to the drug table is a valid
/// outcome that simply yields no recommendations.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DiseaseLabel(pub String);

impl DiseaseLabel {
    pub fn new(label: impl Into<String>) -> Self {
        Self(label.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for DiseaseLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
