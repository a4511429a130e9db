//! File-backed table cache with reload support.
//!
//! `TableStore` loads its table on first use and hands out `Arc` handles to
//! the parsed, immutable table. `refresh()` re-reads the file and swaps the
//! handle in one step; checks already running keep the handle they cloned.
//! A failed load or refresh leaves the cached table (if any) in place.

use std::path::{Path, PathBuf};
use std::sync::{Arc, RwLock};

use tracing::{info, warn};

use remedy_contracts::{
    advisory::DetectedInteraction,
    error::{RemedyError, RemedyResult},
};
use remedy_core::traits::{DrugSource, InteractionSource};

use crate::{
    drug::{check_disease, DrugCatalog},
    interaction::InteractionTable,
};

/// A table type that can be read from a file.
pub trait TableFile: Sized + Send + Sync {
    /// Human-readable table name for logs.
    const KIND: &'static str;

    fn load(path: &Path) -> RemedyResult<Self>;
}

impl TableFile for DrugCatalog {
    const KIND: &'static str = "drug table";

    fn load(path: &Path) -> RemedyResult<Self> {
        DrugCatalog::from_file(path)
    }
}

impl TableFile for InteractionTable {
    const KIND: &'static str = "interaction table";

    fn load(path: &Path) -> RemedyResult<Self> {
        InteractionTable::from_file(path)
    }
}

/// A lazily loaded, refreshable handle to a table file.
pub struct TableStore<T> {
    path: PathBuf,
    current: RwLock<Option<Arc<T>>>,
}

impl<T: TableFile> TableStore<T> {
    /// Create a store that loads `path` on first access.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            current: RwLock::new(None),
        }
    }

    /// Create a store and load `path` immediately.
    pub fn open(path: impl Into<PathBuf>) -> RemedyResult<Self> {
        let store = Self::new(path);
        store.refresh()?;
        Ok(store)
    }

    /// The cached table, loading it first if nothing is cached yet.
    pub fn get(&self) -> RemedyResult<Arc<T>> {
        {
            let guard = self.current.read().map_err(|_| poisoned::<T>())?;
            if let Some(table) = guard.as_ref() {
                return Ok(Arc::clone(table));
            }
        }
        self.refresh()
    }

    /// Re-read the file and replace the cached table.
    ///
    /// On failure the previous table stays cached and the error is returned.
    pub fn refresh(&self) -> RemedyResult<Arc<T>> {
        let table = match T::load(&self.path) {
            Ok(table) => Arc::new(table),
            Err(e) => {
                warn!(
                    table = T::KIND,
                    path = %self.path.display(),
                    error = %e,
                    "table load failed"
                );
                return Err(e);
            }
        };

        let mut guard = self.current.write().map_err(|_| poisoned::<T>())?;
        *guard = Some(Arc::clone(&table));
        info!(table = T::KIND, path = %self.path.display(), "table cache refreshed");
        Ok(table)
    }
}

fn poisoned<T: TableFile>() -> RemedyError {
    RemedyError::data_unavailable(format!("{} cache lock poisoned", T::KIND))
}

impl DrugSource for TableStore<DrugCatalog> {
    fn drugs_for(&self, disease: &str) -> RemedyResult<Vec<String>> {
        // Blank labels never touch the file.
        check_disease(disease)?;
        self.get()?.lookup(disease)
    }
}

impl InteractionSource for TableStore<InteractionTable> {
    fn find_interactions(&self, drugs: &[String]) -> RemedyResult<Vec<DetectedInteraction>> {
        if drugs.len() < 2 {
            return Err(RemedyError::insufficient_input(format!(
                "interaction check needs at least two drugs, got {}",
                drugs.len()
            )));
        }
        self.get()?.check(drugs)
    }
}
