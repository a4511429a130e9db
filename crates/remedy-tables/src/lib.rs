//! # remedy-tables
//!
//! Read-only relation tables for the Remedy pipeline.
//!
//! ## Overview
//!
//! - [`load_catalog`] reads the symptom catalog (JSON array, feature order).
//! - [`DrugCatalog`] is the disease → drug relation and implements
//!   [`DrugSource`](remedy_core::traits::DrugSource).
//! - [`InteractionTable`] is the symmetric drug–drug relation and implements
//!   [`InteractionSource`](remedy_core::traits::InteractionSource).
//! - [`TableStore`] wraps either table file with a lazily loaded, refreshable
//!   cache and implements the same traits.
//!
//! ## Quick start
//!
//! ```rust,ignore
//! use remedy_tables::{InteractionTable, TableStore};
//!
//! let interactions = TableStore::<InteractionTable>::open("data/interaction_data.csv")?;
//! let found = interactions.get()?.check(&["Aspirin", "Warfarin"])?;
//! ```

pub mod catalog;
pub mod drug;
pub mod interaction;
mod reader;
pub mod store;

pub use catalog::{catalog_from_json_str, load_catalog};
pub use drug::{DrugCatalog, DrugRecord};
pub use interaction::{InteractionRecord, InteractionTable};
pub use store::{TableFile, TableStore};

// ── Tests ─────────────────────────────────────────────────────────────────────
