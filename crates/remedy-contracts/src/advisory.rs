//! User-facing advisory messages and interaction findings.
//!
//! Every line the decision-support pipeline shows to a user is an `Advisory`.
//! The severity travels with the text so callers decide how to render it
//! without inspecting message prefixes.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::RemedyError;

/// Shown when an interaction check finds no interacting pair.
pub const NO_INTERACTIONS: &str = "✅ No known drug–drug interactions detected";

/// Shown when fewer than two drugs are submitted for an interaction check.
pub const SELECT_TWO_DRUGS: &str = "⚠ Please select at least two drugs for interaction check";

/// Shown when the interaction table cannot be loaded.
pub const INTERACTION_DATA_UNAVAILABLE: &str = "⚠ Drug interaction data could not be loaded";

/// Shown when the drug table cannot be loaded or is malformed.
pub const DRUG_DATA_UNAVAILABLE: &str = "⚠ Drug recommendation data could not be loaded";

/// Shown when a disease has no entries in the drug table.
pub const OUTSIDE_SCOPE: &str = "Drug recommendation for this disease is outside the current scope";

/// How an advisory should be presented.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// Something the user must pay attention to (an interaction, a rejected request).
    Warning,
    /// Informational, including all-clear results.
    Info,
}

/// A single user-facing message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Advisory {
    pub severity: Severity,
    pub message: String,
}

impl Advisory {
    pub fn warning(message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Warning,
            message: message.into(),
        }
    }

    pub fn info(message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Info,
            message: message.into(),
        }
    }

    pub fn is_warning(&self) -> bool {
        self.severity == Severity::Warning
    }

    /// Generic boundary conversion: any error becomes one warning line.
    pub fn from_error(err: &RemedyError) -> Self {
        Self::warning(format!("⚠ {}", err.reason()))
    }
}

impl fmt::Display for Advisory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

/// One interacting drug pair found by the interaction matcher.
///
/// `drug_a` and `drug_b` keep the order in which they were submitted, not the
/// order of the table row that matched.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DetectedInteraction {
    pub drug_a: String,
    pub drug_b: String,
    /// Description copied verbatim from the interaction table.
    pub description: String,
}

impl DetectedInteraction {
    /// The warning line shown for this pair.
    pub fn to_advisory(&self) -> Advisory {
        Advisory::warning(format!(
            "⚠ Interaction between {} and {}: {}",
            self.drug_a, self.drug_b, self.description
        ))
    }
}
