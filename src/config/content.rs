//! Content store configuration

use serde::Deserialize;
use std::path::PathBuf;

use super::database::DatabaseConfig;
use super::error::ValidationError;

/// Where step outlines, content units and progress live.
#[derive(Debug, Clone, Copy, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum StoreBackend {
    /// In-process store loaded from a YAML seed
    #[default]
    Memory,
    Postgres,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ContentConfig {
    #[serde(default)]
    pub store: StoreBackend,

    /// YAML seed for the memory store; the bundled demo seed when unset
    pub seed_path: Option<PathBuf>,
}

impl ContentConfig {
    pub fn validate(&self, database: &DatabaseConfig) -> Result<(), ValidationError> {
        if self.store == StoreBackend::Postgres && database.url.is_none() {
            return Err(ValidationError::MissingRequired("DATABASE__URL"));
        }
        Ok(())
    }
}
