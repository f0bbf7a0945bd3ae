//! Warehouse secret configuration.
//!
//! Credentials live in a TOML secrets file outside the repository, under a
//! `[snowflake]` table. The file path comes from the caller; nothing here
//! reads environment variables or command-line input.

use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors loading the secrets file.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cannot read secrets file '{path}': {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },

    #[error("cannot parse secrets file '{path}': {source}")]
    Parse {
        path: String,
        source: toml::de::Error,
    },
}

/// Connection identifiers for the warehouse session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WarehouseConfig {
    pub account: String,
    pub user: String,
    pub password: String,
    pub database: String,
    pub schema: String,
    pub warehouse: String,
}

#[derive(Debug, Deserialize)]
struct SecretsFile {
    snowflake: WarehouseConfig,
}

impl WarehouseConfig {
    /// Load from a TOML secrets file with a `[snowflake]` table.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_toml(&content).map_err(|source| ConfigError::Parse {
            path: path.display().to_string(),
            source,
        })
    }

    /// Parse from TOML text.
    pub fn from_toml(content: &str) -> Result<Self, toml::de::Error> {
        let secrets: SecretsFile = toml::from_str(content)?;
        Ok(secrets.snowflake)
    }
}
