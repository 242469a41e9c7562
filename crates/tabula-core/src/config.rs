//! Runtime configuration, read from `tabula.toml`.
//!
//! ```toml
//! debug = true
//!
//! [store]
//! path = "pokedex.sqlite3"
//! foreign_keys = true
//! busy_timeout_ms = 500
//!
//! [tables]
//! Stats = "pokemon_stats"
//! ```

use serde::Deserialize;
use std::{
    collections::BTreeMap,
    fs,
    path::{Path, PathBuf},
};
use thiserror::Error as ThisError;

/// Conventional config file name.
pub const CONFIG_FILE_NAME: &str = "tabula.toml";

///
/// ConfigError
///

#[derive(Debug, ThisError)]
pub enum ConfigError {
    #[error("invalid config: {0}")]
    Invalid(String),

    #[error("failed to read config {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),
}

///
/// Config
///

#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    pub store: StoreConfig,

    /// Model name to explicit table name.
    pub tables: BTreeMap<String, String>,

    /// Log every resolved model descriptor at `info`.
    pub debug: bool,
}

impl Config {
    /// Parse and validate a TOML document.
    pub fn from_toml_str(source: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(source)?;
        config.validate()?;

        Ok(config)
    }

    /// Read, parse, and validate a config file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let source = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        Self::from_toml_str(&source)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        for (model, table) in &self.tables {
            if model.trim().is_empty() {
                return Err(ConfigError::Invalid(
                    "table override with an empty model name".to_string(),
                ));
            }
            if table.trim().is_empty() {
                return Err(ConfigError::Invalid(format!(
                    "empty table override for model {model}"
                )));
            }
        }

        if self.store.busy_timeout_ms == Some(0) {
            return Err(ConfigError::Invalid(
                "store.busy_timeout_ms must be positive".to_string(),
            ));
        }

        Ok(())
    }

    #[must_use]
    pub fn table_override(&self, model: &str) -> Option<&str> {
        self.tables.get(model).map(String::as_str)
    }
}

///
/// StoreConfig
///

#[derive(Clone, Debug, Deserialize, Eq, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct StoreConfig {
    /// Database file; absent means an in-memory store.
    pub path: Option<PathBuf>,
    pub foreign_keys: bool,
    pub busy_timeout_ms: Option<u64>,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            path: None,
            foreign_keys: true,
            busy_timeout_ms: None,
        }
    }
}

///
/// TESTS
///
