//! Tree-ensemble disease classifier loaded from a JSON artifact.
//!
//! The artifact is an export of a fitted random forest. Each tree is stored
//! as parallel node arrays:
//!
//! ```json
//! {
//!   "classes": ["Flu", "Migraine"],
//!   "n_features": 3,
//!   "trees": [{
//!     "children_left":  [1, -1, -1],
//!     "children_right": [2, -1, -1],
//!     "feature":        [0, -2, -2],
//!     "threshold":      [0.5, -2.0, -2.0],
//!     "value":          [[3, 3], [0, 3], [3, 0]]
//!   }]
//! }
//! ```
//!
//! A node whose `children_left` is `-1` is a leaf; `value` holds per-class
//! weights. Prediction sends a sample left when `x[feature] <= threshold`,
//! normalizes each reached leaf, averages across trees, and picks the class
//! with the highest mean (the earliest class on ties).

use std::path::Path;

use serde::Deserialize;
use tracing::{debug, info};

use remedy_contracts::{
    error::{RemedyError, RemedyResult},
    symptom::{DiseaseLabel, FeatureVector},
};
use remedy_core::traits::DiseaseClassifier;

const LEAF: i64 = -1;

/// One fitted decision tree in array form.
#[derive(Debug, Clone, Deserialize)]
pub struct DecisionTree {
    pub children_left: Vec<i64>,
    pub children_right: Vec<i64>,
    pub feature: Vec<i64>,
    pub threshold: Vec<f64>,
    pub value: Vec<Vec<f64>>,
}

impl DecisionTree {
    /// Check the node arrays are mutually consistent.
    ///
    /// Children must point strictly forward, which also rules out cycles.
    fn validate(&self, tree: usize, n_features: usize, n_classes: usize) -> RemedyResult<()> {
        let n = self.children_left.len();
        let invalid = |what: String| {
            RemedyError::data_unavailable(format!("disease model tree {tree}: {what}"))
        };

        if n == 0 {
            return Err(invalid("has no nodes".to_string()));
        }
        if self.children_right.len() != n
            || self.feature.len() != n
            || self.threshold.len() != n
            || self.value.len() != n
        {
            return Err(invalid("node arrays differ in length".to_string()));
        }

        for node in 0..n {
            let (left, right) = (self.children_left[node], self.children_right[node]);
            if left == LEAF {
                if right != LEAF {
                    return Err(invalid(format!("node {node} has only a right child")));
                }
            } else {
                for child in [left, right] {
                    if child <= node as i64 || child >= n as i64 {
                        return Err(invalid(format!("node {node} has child {child} out of order")));
                    }
                }
                let feature = self.feature[node];
                if feature < 0 || feature >= n_features as i64 {
                    return Err(invalid(format!("node {node} splits on unknown feature {feature}")));
                }
            }
            if self.value[node].len() != n_classes {
                return Err(invalid(format!(
                    "node {node} has {} class weights, expected {n_classes}",
                    self.value[node].len()
                )));
            }
        }
        Ok(())
    }

    /// Class weights of the leaf `x` falls into.
    fn leaf(&self, x: &[u8]) -> &[f64] {
        let mut node = 0usize;
        loop {
            let left = self.children_left[node];
            if left == LEAF {
                return &self.value[node];
            }
            let feature = self.feature[node] as usize;
            node = if f64::from(x[feature]) <= self.threshold[node] {
                left as usize
            } else {
                self.children_right[node] as usize
            };
        }
    }
}

#[derive(Debug, Deserialize)]
struct ForestArtifact {
    classes: Vec<String>,
    n_features: usize,
    trees: Vec<DecisionTree>,
}

/// A fitted random forest over binary symptom features.
#[derive(Debug, Clone)]
pub struct ForestClassifier {
    classes: Vec<String>,
    n_features: usize,
    trees: Vec<DecisionTree>,
}

impl ForestClassifier {
    /// Parse and validate a forest artifact.
    ///
    /// Returns `RemedyError::DataUnavailable` for malformed JSON or an
    /// inconsistent forest.
    pub fn from_json_str(s: &str) -> RemedyResult<Self> {
        let artifact: ForestArtifact = serde_json::from_str(s).map_err(|e| {
            RemedyError::data_unavailable(format!("failed to parse disease model: {e}"))
        })?;

        if artifact.classes.is_empty() {
            return Err(RemedyError::data_unavailable("disease model has no classes"));
        }
        if artifact.trees.is_empty() {
            return Err(RemedyError::data_unavailable("disease model has no trees"));
        }
        for (idx, tree) in artifact.trees.iter().enumerate() {
            tree.validate(idx, artifact.n_features, artifact.classes.len())?;
        }

        Ok(Self {
            classes: artifact.classes,
            n_features: artifact.n_features,
            trees: artifact.trees,
        })
    }

    pub fn from_file(path: &Path) -> RemedyResult<Self> {
        let contents = std::fs::read_to_string(path).map_err(|e| {
            RemedyError::data_unavailable(format!(
                "failed to read disease model '{}': {}",
                path.display(),
                e
            ))
        })?;
        let model = Self::from_json_str(&contents)?;
        info!(
            path = %path.display(),
            trees = model.trees.len(),
            classes = model.classes.len(),
            features = model.n_features,
            "disease model loaded"
        );
        Ok(model)
    }

    pub fn n_features(&self) -> usize {
        self.n_features
    }

    /// Mean class probabilities across trees, in class order.
    pub fn predict_proba(&self, features: &FeatureVector) -> RemedyResult<Vec<f64>> {
        if features.len() != self.n_features {
            return Err(RemedyError::data_unavailable(format!(
                "disease model expects {} features, got {}",
                self.n_features,
                features.len()
            )));
        }

        let x = features.as_slice();
        let mut totals = vec![0.0; self.classes.len()];
        for tree in &self.trees {
            let weights = tree.leaf(x);
            let sum: f64 = weights.iter().sum();
            if sum <= 0.0 {
                continue;
            }
            for (total, w) in totals.iter_mut().zip(weights) {
                *total += w / sum;
            }
        }

        let n_trees = self.trees.len() as f64;
        Ok(totals.into_iter().map(|t| t / n_trees).collect())
    }
}

impl DiseaseClassifier for ForestClassifier {
    fn predict(&self, features: &FeatureVector) -> RemedyResult<DiseaseLabel> {
        let proba = self.predict_proba(features)?;

        let mut best = 0;
        for (idx, p) in proba.iter().enumerate() {
            if *p > proba[best] {
                best = idx;
            }
        }

        debug!(
            class = %self.classes[best],
            probability = proba[best],
            "forest prediction"
        );
        Ok(DiseaseLabel::new(self.classes[best].clone()))
    }
}
