//! The drug–drug interaction relation and the pairwise matcher.
//!
//! `InteractionTable` is loaded from a CSV with at least `drug1`, `drug2` and
//! `interaction` columns. Rows are directionally unordered: a row
//! `(a, b, desc)` matches the pair `(b, a)` just as well.
//!
//! Matching algorithm:
//!
//! 1. Reject fewer than two drugs.
//! 2. Enumerate pairs `(d[i], d[j])` for `i < j` in input order:
//!    `(d0,d1), (d0,d2), …, (d1,d2), …`.
//! 3. Look each pair up by its unordered key. The key index is built at load
//!    time and keeps the first table row for a duplicated pair, so the
//!    earliest row wins.
//! 4. Each pair contributes at most one finding.

use std::collections::{BTreeSet, HashMap};
use std::io::Read;
use std::path::Path;

use tracing::{debug, info};

use remedy_contracts::{
    advisory::DetectedInteraction,
    error::{RemedyError, RemedyResult},
};
use remedy_core::traits::InteractionSource;

use crate::reader::read_columns;

/// One (drug1, drug2, interaction) row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InteractionRecord {
    pub drug1: String,
    pub drug2: String,
    /// Free-text description, reproduced verbatim in warnings.
    pub interaction: String,
}

/// Order-independent key for a drug pair.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
struct PairKey(String, String);

impl PairKey {
    fn new(a: &str, b: &str) -> Self {
        if a <= b {
            Self(a.to_string(), b.to_string())
        } else {
            Self(b.to_string(), a.to_string())
        }
    }
}

/// The full interaction table with its unordered-pair index.
#[derive(Debug, Clone, Default)]
pub struct InteractionTable {
    rows: Vec<InteractionRecord>,
    index: HashMap<PairKey, usize>,
}

impl InteractionTable {
    /// Build a table from rows in file order.
    pub fn from_records(rows: Vec<InteractionRecord>) -> Self {
        let mut index = HashMap::with_capacity(rows.len());
        for (idx, row) in rows.iter().enumerate() {
            let key = PairKey::new(&row.drug1, &row.drug2);
            if index.contains_key(&key) {
                debug!(
                    drug1 = %row.drug1,
                    drug2 = %row.drug2,
                    row = idx,
                    "duplicate interaction pair, earlier row kept"
                );
                continue;
            }
            index.insert(key, idx);
        }
        Self { rows, index }
    }

    /// Parse CSV from `reader`.
    ///
    /// Returns `RemedyError::DataUnavailable` if a required column is missing
    /// or a row is malformed. Drug names are trimmed and rows lacking either
    /// name are skipped; the description is kept exactly as written.
    pub fn from_reader<R: Read>(reader: R) -> RemedyResult<Self> {
        let rows = read_columns(reader, "interaction table", ["drug1", "drug2", "interaction"])?
            .into_iter()
            .filter_map(|[drug1, drug2, interaction]| {
                let (drug1, drug2) = (drug1.trim().to_string(), drug2.trim().to_string());
                if drug1.is_empty() || drug2.is_empty() {
                    debug!(%drug1, %drug2, "skipping incomplete interaction row");
                    None
                } else {
                    Some(InteractionRecord {
                        drug1,
                        drug2,
                        interaction,
                    })
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
                "failed to open interaction table '{}': {}",
                path.display(),
                e
            ))
        })?;
        let table = Self::from_reader(file)?;
        info!(
            path = %path.display(),
            rows = table.len(),
            pairs = table.index.len(),
            "interaction table loaded"
        );
        Ok(table)
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// The first row recorded for the unordered pair `{a, b}`.
    pub fn find(&self, a: &str, b: &str) -> Option<&InteractionRecord> {
        self.index.get(&PairKey::new(a, b)).map(|&i| &self.rows[i])
    }

    /// Check every unordered pair of `drugs`.
    ///
    /// Returns `RemedyError::InsufficientInput` for fewer than two drugs,
    /// before any pair is enumerated. Findings come back in pair enumeration
    /// order, each naming the drugs in the order they were submitted.
    pub fn check<S: AsRef<str>>(&self, drugs: &[S]) -> RemedyResult<Vec<DetectedInteraction>> {
        if drugs.len() < 2 {
            return Err(RemedyError::insufficient_input(format!(
                "interaction check needs at least two drugs, got {}",
                drugs.len()
            )));
        }

        let mut found = Vec::new();
        for (i, first) in drugs.iter().enumerate() {
            for second in &drugs[i + 1..] {
                let (a, b) = (first.as_ref(), second.as_ref());
                if let Some(row) = self.find(a, b) {
                    debug!(drug_a = %a, drug_b = %b, "interaction detected");
                    found.push(DetectedInteraction {
                        drug_a: a.to_string(),
                        drug_b: b.to_string(),
                        description: row.interaction.clone(),
                    });
                }
            }
        }

        debug!(
            drugs = drugs.len(),
            pairs = drugs.len() * (drugs.len() - 1) / 2,
            interactions = found.len(),
            "interaction check complete"
        );
        Ok(found)
    }

    /// Every drug named in either column, sorted and de-duplicated.
    pub fn drugs(&self) -> Vec<&str> {
        self.rows
            .iter()
            .flat_map(|r| [r.drug1.as_str(), r.drug2.as_str()])
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }
}

impl InteractionSource for InteractionTable {
    fn find_interactions(&self, drugs: &[String]) -> RemedyResult<Vec<DetectedInteraction>> {
        self.check(drugs)
    }
}
