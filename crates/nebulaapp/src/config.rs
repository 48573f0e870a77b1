//! # Configuration
//!
//! Nebula configuration is loaded with [`confique`] from, in priority order:
//!
//! 1. **Command line flags**: `--catalog-file` (applied by [`crate::init`]).
//! 2. **Environment variables**: `NEBULA_API_BASE_URL`, `NEBULA_CATALOG_FILE`.
//! 3. **Config file**: `nebula.toml` in the OS config directory (via `directories`).
//! 4. **Compiled defaults**: `#[config(default = ...)]`.
//!
//! ## Available Settings
//!
//! | Key | Default | Description |
//! |-----|---------|-------------|
//! | `api_base_url` | `http://localhost:8000` | Catalog API root; one trailing `/` is ignored |
//! | `catalog_file` | (none) | JSON snapshot of the catalog; when set, no network is used |

use crate::error::{NebulaError, Result};
use confique::Config;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

pub const DEFAULT_API_BASE_URL: &str = "http://localhost:8000";
pub const CONFIG_FILE_NAME: &str = "nebula.toml";

#[derive(Config, Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct NebulaConfig {
    /// Root URL of the card catalog API.
    #[config(default = "http://localhost:8000", env = "NEBULA_API_BASE_URL")]
    pub api_base_url: String,

    /// Offline catalog: a JSON array of cards used instead of the API.
    #[config(env = "NEBULA_CATALOG_FILE")]
    pub catalog_file: Option<PathBuf>,
}

impl Default for NebulaConfig {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            catalog_file: None,
        }
    }
}

impl NebulaConfig {
    /// Loads env vars over the (optional) config file over defaults.
    pub fn load(file: Option<&Path>) -> Result<Self> {
        let mut builder = Self::builder().env();
        if let Some(path) = file {
            builder = builder.file(path);
        }
        builder
            .load()
            .map_err(|e| NebulaError::Config(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = NebulaConfig::default();
        assert_eq!(config.api_base_url, "http://localhost:8000");
        assert!(config.catalog_file.is_none());
    }

    // Reads the file over the defaults, ignoring whatever the environment holds.
    fn from_file(path: &Path) -> NebulaConfig {
        NebulaConfig::builder().file(path).load().unwrap()
    }

    #[test]
    fn test_missing_file_uses_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = from_file(&dir.path().join(CONFIG_FILE_NAME));
        assert_eq!(config, NebulaConfig::default());
    }

    #[test]
    fn test_file_values_are_read() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILE_NAME);
        std::fs::write(&path, "catalog_file = \"/tmp/cards.json\"\n").unwrap();
        let config = from_file(&path);
        assert_eq!(config.catalog_file, Some(PathBuf::from("/tmp/cards.json")));
        assert_eq!(config.api_base_url, DEFAULT_API_BASE_URL);
    }

    #[test]
    fn test_malformed_file_is_config_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILE_NAME);
        std::fs::write(&path, "api_base_url = [").unwrap();
        assert!(matches!(
            NebulaConfig::load(Some(&path)),
            Err(NebulaError::Config(_))
        ));
    }
}
