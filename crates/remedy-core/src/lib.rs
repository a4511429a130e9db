//! # remedy-core
//!
//! The symptom-to-drug decision-support pipeline.
//!
//! This crate provides:
//! - The seam traits (`DiseaseClassifier`, `RiskModel`, `DrugSource`,
//!   `InteractionSource`) behind which tables and model artifacts live
//! - The symptom vectorizer
//! - `Advisor`, which wires vectorizer → classifier → drug lookup →
//!   interaction check, and `RiskAssessor` for the separate risk pipeline
//!
//! ## Usage
//!
//! ```rust,ignore
//! use remedy_core::{Advisor, RiskAssessor};
//!
//! let advisor = Advisor::new(catalog, Box::new(forest), Box::new(drugs), Box::new(interactions));
//! let consultation = advisor.consult(selected)?;
//! ```

pub mod advisor;
pub mod risk;
pub mod traits;
pub mod vectorize;

pub use advisor::{interaction_advisories, Advisor};
pub use risk::RiskAssessor;
pub use vectorize::vectorize;
