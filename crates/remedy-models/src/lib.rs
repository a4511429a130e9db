//! # remedy-models
//!
//! Frozen predictors for the Remedy pipeline, loaded from JSON artifacts.
//!
//! This crate provides [`ForestClassifier`], which implements
//! [`DiseaseClassifier`](remedy_core::traits::DiseaseClassifier), and
//! [`HypertensionModel`], which implements
//! [`RiskModel`](remedy_core::traits::RiskModel). Both are fitted offline;
//! nothing here trains or updates a model.
//!
//! ## Quick start
//!
//! ```rust,ignore
//! use std::path::Path;
//! use remedy_models::{ForestClassifier, HypertensionModel};
//!
//! let disease = ForestClassifier::from_file(Path::new("data/models/disease_forest.json"))?;
//! let risk = HypertensionModel::from_file(Path::new("data/models/hypertension.json"))?;
//! ```

pub mod forest;
pub mod logistic;

pub use forest::{DecisionTree, ForestClassifier};
pub use logistic::{HypertensionModel, LogisticRegression, StandardScaler};

// ── Tests ─────────────────────────────────────────────────────────────────────
