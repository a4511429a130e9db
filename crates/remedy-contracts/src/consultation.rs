//! The report produced for one symptom submission.
//!
//! A `Consultation` captures everything the symptom pipeline derived for a
//! single request: the predicted disease, the drugs looked up for it, and the
//! advisories the interaction check produced. It is ephemeral; nothing here
//! is persisted by the runtime.

use std::collections::BTreeSet;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{advisory::Advisory, symptom::DiseaseLabel};

/// Unique identifier for one consultation, carried in log lines.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ConsultationId(pub uuid::Uuid);

impl ConsultationId {
    pub fn new() -> Self {
        Self(uuid::Uuid::new_v4())
    }
}

impl Default for ConsultationId {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Consultation {
    pub id: ConsultationId,
    /// Wall-clock time the consultation was produced (UTC).
    pub created_at: DateTime<Utc>,
    /// Symptoms as submitted, including any the catalog does not know.
    pub symptoms: BTreeSet<String>,
    pub disease: DiseaseLabel,
    /// Drugs recommended for `disease`, in drug-table row order. Empty when
    /// the disease is outside the table's scope or the lookup failed.
    pub drugs: Vec<String>,
    /// Messages about the recommendation step itself (out of scope, lookup failure).
    pub notices: Vec<Advisory>,
    /// Result of the interaction check over `drugs`. Never empty.
    pub safety: Vec<Advisory>,
}

impl Consultation {
    /// True if any safety advisory is a warning.
    pub fn has_safety_warnings(&self) -> bool {
        self.safety.iter().any(Advisory::is_warning)
    }
}
