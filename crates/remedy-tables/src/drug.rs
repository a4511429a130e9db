//! The disease → drug relation.
//!
//! `DrugCatalog` is loaded from a CSV with at least `disease` and `drug`
//! columns. Lookups return drugs in the file's row order, with no
//! de-duplication and no sorting.

use std::collections::HashMap;
use std::io::Read;
use std::path::Path;

use tracing::{debug, info};

use remedy_contracts::error::{RemedyError, RemedyResult};
use remedy_core::traits::DrugSource;

use crate::reader::read_columns;

/// One (disease, drug) row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DrugRecord {
    pub disease: String,
    pub drug: String,
}

/// The full drug table, indexed by disease.
#[derive(Debug, Clone, Default)]
pub struct DrugCatalog {
    rows: Vec<DrugRecord>,
    by_disease: HashMap<String, Vec<usize>>,
}

impl DrugCatalog {
    /// Build a catalog from rows in table order.
    pub fn from_records(rows: Vec<DrugRecord>) -> Self {
        let mut by_disease: HashMap<String, Vec<usize>> = HashMap::new();
        for (idx, row) in rows.iter().enumerate() {
            by_disease.entry(row.disease.clone()).or_default().push(idx);
        }
        Self { rows, by_disease }
    }

    /// Parse CSV from `reader`.
    ///
    /// Returns `RemedyError::DataUnavailable` if the `disease` or `drug`
    /// column is missing or a row is malformed. Both cells are trimmed; rows
    /// with an empty or missing disease or drug cell are skipped.
    pub fn from_reader<R: Read>(reader: R) -> RemedyResult<Self> {
        let rows = read_columns(reader, "drug table", ["disease", "drug"])?
            .into_iter()
            .filter_map(|[disease, drug]| {
                let (disease, drug) = (disease.trim().to_string(), drug.trim().to_string());
                if disease.is_empty() || drug.is_empty() {
                    debug!(%disease, %drug, "skipping incomplete drug row");
                    None
                } else {
                    Some(DrugRecord { disease, drug })
                }
            })
            .collect();
        Ok(Self::from_records(rows))
    }

    pub fn from_csv_str(s: &str) -> RemedyResult<Self> {
        Self::from_reader(s.as_bytes())
    }

    /// Read and parse the CSV file at `path`.
    pub fn from_file(path: &Path) -> RemedyResult<Self> {
        let file = std::fs::File::open(path).map_err(|e| {
            RemedyError::data_unavailable(format!(
                "failed to open drug table '{}': {}",
                path.display(),
                e
            ))
        })?;
        let catalog = Self::from_reader(file)?;
        info!(
            path = %path.display(),
            rows = catalog.len(),
            diseases = catalog.by_disease.len(),
            "drug table loaded"
        );
        Ok(catalog)
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Drugs listed for `disease`, in row order.
    ///
    /// A blank `disease` is rejected with `RemedyError::InvalidInput` without
    /// consulting the table. An unknown disease yields an empty vector.
    pub fn lookup(&self, disease: &str) -> RemedyResult<Vec<String>> {
        check_disease(disease)?;

        let drugs: Vec<String> = self
            .by_disease
            .get(disease)
            .map(|rows| rows.iter().map(|&i| self.rows[i].drug.clone()).collect())
            .unwrap_or_default();

        debug!(%disease, matches = drugs.len(), "drug lookup");
        Ok(drugs)
    }
}

/// Reject empty or whitespace-only disease labels.
pub(crate) fn check_disease(disease: &str) -> RemedyResult<()> {
    if disease.trim().is_empty() {
        return Err(RemedyError::invalid_input("Invalid disease input"));
    }
    Ok(())
}

impl DrugSource for DrugCatalog {
    fn drugs_for(&self, disease: &str) -> RemedyResult<Vec<String>> {
        self.lookup(disease)
    }
}

#[cfg(test)]
mod tests {
    use remedy_contracts::error::RemedyError;

    use super::DrugCatalog;

    const DRUGS: &str = "\
disease,drug
Flu,Oseltamivir
Migraine,Sumatriptan
Flu,Paracetamol
Flu,Oseltamivir
";

    #[test]
    fn lookup_preserves_row_order_and_duplicates() {
        let catalog = DrugCatalog::from_csv_str(DRUGS).unwrap();

        assert_eq!(
            catalog.lookup("Flu").unwrap(),
            vec!["Oseltamivir", "Paracetamol", "Oseltamivir"]
        );
        assert_eq!(catalog.lookup("Migraine").unwrap(), vec!["Sumatriptan"]);
    }

    #[test]
    fn unknown_disease_is_empty_not_error() {
        let catalog = DrugCatalog::from_csv_str(DRUGS).unwrap();
        assert!(catalog.lookup("UnknownXYZ").unwrap().is_empty());
    }

    #[test]
    fn lookup_is_exact_match() {
        let catalog = DrugCatalog::from_csv_str(DRUGS).unwrap();
        assert!(catalog.lookup("flu").unwrap().is_empty());
    }

    #[test]
    fn blank_disease_is_invalid_input() {
        let catalog = DrugCatalog::from_csv_str(DRUGS).unwrap();

        for blank in ["", "   ", "\t"] {
            assert!(
                matches!(catalog.lookup(blank), Err(RemedyError::InvalidInput { .. })),
                "{blank:?} should be rejected"
            );
        }
    }

    #[test]
    fn missing_column_is_data_unavailable() {
        let result = DrugCatalog::from_csv_str("disease,medicine\nFlu,Oseltamivir\n");

        match result {
            Err(RemedyError::DataUnavailable { reason }) => {
                assert!(reason.contains("'drug'"), "unexpected reason: {reason}");
            }
            other => panic!("expected DataUnavailable, got {:?}", other),
        }
    }

    #[test]
    fn extra_columns_and_padding_are_tolerated() {
        let csv = "id, drug , disease\n1, Oseltamivir , Flu\n2,Zanamivir,Flu\n";
        let catalog = DrugCatalog::from_csv_str(csv).unwrap();

        assert_eq!(catalog.lookup("Flu").unwrap(), vec!["Oseltamivir", "Zanamivir"]);
    }

    #[test]
    fn short_row_is_skipped_and_table_still_loads() {
        let catalog =
            DrugCatalog::from_csv_str("disease,drug\nFlu,Oseltamivir\nFlu\nFlu,Paracetamol\n")
                .unwrap();

        assert_eq!(catalog.len(), 2);
        assert_eq!(catalog.lookup("Flu").unwrap(), vec!["Oseltamivir", "Paracetamol"]);
    }
}
