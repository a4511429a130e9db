//! `remedy.toml` loading.
//!
//! The config only names where the data tables and model artifacts live:
//!
//! ```toml
//! [data]
//! symptoms = "data/symptoms.json"
//! drugs = "data/drug_data.csv"
//! interactions = "data/interaction_data.csv"
//!
//! [models]
//! disease = "data/models/disease_forest.json"
//! hypertension = "data/models/hypertension.json"
//! ```
//!
//! Relative paths in a config read from disk resolve against the directory
//! containing the config file, not the process working directory.

use std::path::{Path, PathBuf};

use serde::Deserialize;
use tracing::debug;

use remedy_contracts::error::{RemedyError, RemedyResult};

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DataPaths {
    pub symptoms: PathBuf,
    pub drugs: PathBuf,
    pub interactions: PathBuf,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ModelPaths {
    pub disease: PathBuf,
    pub hypertension: PathBuf,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RemedyConfig {
    pub data: DataPaths,
    pub models: ModelPaths,
}

impl RemedyConfig {
    /// Parse `s` as TOML. Paths are kept exactly as written.
    ///
    /// Returns `RemedyError::ConfigError` if the TOML is malformed or a
    /// section or key is missing or unknown.
    pub fn from_toml_str(s: &str) -> RemedyResult<Self> {
        toml::from_str(s).map_err(|e| RemedyError::ConfigError {
            reason: format!("failed to parse config TOML: {}", e),
        })
    }

    /// Read and parse the config file at `path`, resolving relative paths
    /// against its parent directory.
    pub fn from_file(path: &Path) -> RemedyResult<Self> {
        let contents = std::fs::read_to_string(path).map_err(|e| RemedyError::ConfigError {
            reason: format!("failed to read config file '{}': {}", path.display(), e),
        })?;
        let config = Self::from_toml_str(&contents)?;

        let base = path.parent().unwrap_or_else(|| Path::new(""));
        debug!(config = %path.display(), base = %base.display(), "config loaded");
        Ok(config.resolved_against(base))
    }

    /// Join every relative path onto `base`. Absolute paths are untouched.
    pub fn resolved_against(self, base: &Path) -> Self {
        let join = |p: PathBuf| if p.is_absolute() { p } else { base.join(p) };
        Self {
            data: DataPaths {
                symptoms: join(self.data.symptoms),
                drugs: join(self.data.drugs),
                interactions: join(self.data.interactions),
            },
            models: ModelPaths {
                disease: join(self.models.disease),
                hypertension: join(self.models.hypertension),
            },
        }
    }
}
