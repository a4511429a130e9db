//! Symptom catalog loading.
//!
//! The catalog is a JSON array of symptom names in classifier feature order.

use std::path::Path;

use tracing::info;

use remedy_contracts::{
    error::{RemedyError, RemedyResult},
    symptom::SymptomCatalog,
};

/// Parse a catalog from a JSON array of strings.
///
/// Returns `RemedyError::DataUnavailable` for malformed JSON or duplicate names.
pub fn catalog_from_json_str(s: &str) -> RemedyResult<SymptomCatalog> {
    let names: Vec<String> = serde_json::from_str(s).map_err(|e| {
        RemedyError::data_unavailable(format!("failed to parse symptom catalog: {e}"))
    })?;
    SymptomCatalog::new(names)
}

/// Read the catalog file at `path`.
pub fn load_catalog(path: &Path) -> RemedyResult<SymptomCatalog> {
    let contents = std::fs::read_to_string(path).map_err(|e| {
        RemedyError::data_unavailable(format!(
            "failed to read symptom catalog '{}': {}",
            path.display(),
            e
        ))
    })?;
    let catalog = catalog_from_json_str(&contents)?;
    info!(path = %path.display(), symptoms = catalog.len(), "symptom catalog loaded");
    Ok(catalog)
}
