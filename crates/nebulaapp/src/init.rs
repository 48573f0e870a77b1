//! # Initialization
//!
//! [`initialize`] wires a ready-to-use [`NebulaApi`] for the filesystem:
//!
//! 1. Resolve the data directory.
//! 2. Load configuration (env vars over `nebula.toml` over defaults), then apply
//!    command line overrides.
//! 3. Pick the catalog: a snapshot file when one is configured, the HTTP API
//!    otherwise.
//! 4. Open the tracker, which hydrates the ledger from disk before returning.
//!
//! ## Data Directory
//!
//! In priority order:
//! 1. `data_dir` in [`InitOptions`] (`--data-dir`).
//! 2. The `NEBULA_DATA_DIR` environment variable (also what the tests use to
//!    isolate state).
//! 3. The OS data directory via `directories::ProjectDirs`.
//!
//! The tracker state lives in `<data_dir>/nebula-collection-tracker.json`. The
//! directory is created on the first write, not here.

use crate::api::NebulaApi;
use crate::catalog::{CardCatalog, CatalogSource, HttpCatalog, StaticCatalog};
use crate::commands::NebulaPaths;
use crate::config::{NebulaConfig, CONFIG_FILE_NAME};
use crate::error::{NebulaError, Result};
use crate::store::fs_backend::FsBackend;
use crate::store::TrackerStore;
use crate::tracker::Tracker;
use directories::ProjectDirs;
use std::path::PathBuf;

pub const DATA_DIR_ENV: &str = "NEBULA_DATA_DIR";

pub struct NebulaContext {
    pub api: NebulaApi<FsBackend, CatalogSource>,
    pub config: NebulaConfig,
}

#[derive(Debug, Clone, Default)]
pub struct InitOptions {
    pub data_dir: Option<PathBuf>,
    pub catalog_file: Option<PathBuf>,
    pub config_file: Option<PathBuf>,
}

fn project_dirs() -> Option<ProjectDirs> {
    ProjectDirs::from("", "", "nebula")
}

pub fn resolve_data_dir(explicit: Option<PathBuf>) -> Result<PathBuf> {
    if let Some(dir) = explicit {
        return Ok(dir);
    }
    if let Some(dir) = std::env::var_os(DATA_DIR_ENV).filter(|v| !v.is_empty()) {
        return Ok(PathBuf::from(dir));
    }
    project_dirs()
        .map(|dirs| dirs.data_dir().to_path_buf())
        .ok_or_else(|| NebulaError::Config("Could not determine a data directory".to_string()))
}

fn default_config_file() -> Option<PathBuf> {
    project_dirs().map(|dirs| dirs.config_dir().join(CONFIG_FILE_NAME))
}

pub fn build_catalog(config: &NebulaConfig) -> Result<CatalogSource> {
    match &config.catalog_file {
        Some(path) => Ok(CatalogSource::Static(StaticCatalog::from_file(path)?)),
        None => Ok(CatalogSource::Http(HttpCatalog::new(&config.api_base_url)?)),
    }
}

pub fn initialize(options: InitOptions) -> Result<NebulaContext> {
    let data_dir = resolve_data_dir(options.data_dir)?;
    let config_file = options.config_file.or_else(default_config_file);

    let mut config = NebulaConfig::load(config_file.as_deref())?;
    if let Some(path) = options.catalog_file {
        config.catalog_file = Some(path);
    }

    let catalog = build_catalog(&config)?;
    let backend = FsBackend::new(data_dir.clone());
    let tracker = Tracker::open(backend);
    let storage_file = tracker.store().location();

    tracing::debug!(
        data_dir = %data_dir.display(),
        catalog = %catalog.describe(),
        "initialized"
    );

    let paths = NebulaPaths {
        data_dir,
        storage_file,
        config_file,
    };
    let api = NebulaApi::new(tracker, catalog, paths, config.clone());
    Ok(NebulaContext { api, config })
}

/// Location the tracker state would be written to, without opening it.
pub fn storage_location(data_dir: PathBuf) -> PathBuf {
    TrackerStore::new(FsBackend::new(data_dir)).location()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::sample_catalog;

    #[test]
    fn explicit_data_dir_wins() {
        let dir = PathBuf::from("/explicit/nebula");
        assert_eq!(resolve_data_dir(Some(dir.clone())).unwrap(), dir);
    }

    #[test]
    fn storage_file_lives_in_data_dir() {
        let location = storage_location(PathBuf::from("/data"));
        assert_eq!(
            location,
            PathBuf::from("/data/nebula-collection-tracker.json")
        );
    }

    #[test]
    fn catalog_file_selects_static_catalog() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("cards.json");
        std::fs::write(&path, serde_json::to_string(&sample_catalog()).unwrap()).unwrap();

        let config = NebulaConfig {
            catalog_file: Some(path),
            ..Default::default()
        };
        assert!(matches!(
            build_catalog(&config).unwrap(),
            CatalogSource::Static(_)
        ));
    }

    #[test]
    fn default_config_uses_http_catalog() {
        match build_catalog(&NebulaConfig::default()).unwrap() {
            CatalogSource::Http(http) => assert_eq!(http.base_url(), "http://localhost:8000"),
            CatalogSource::Static(_) => panic!("expected http catalog"),
        }
    }

    #[test]
    fn initialize_with_overrides() {
        let dir = tempfile::tempdir().unwrap();
        let catalog = dir.path().join("cards.json");
        std::fs::write(&catalog, serde_json::to_string(&sample_catalog()).unwrap()).unwrap();

        let ctx = initialize(InitOptions {
            data_dir: Some(dir.path().join("data")),
            catalog_file: Some(catalog.clone()),
            config_file: Some(dir.path().join("nebula.toml")),
        })
        .unwrap();
        assert_eq!(ctx.config.catalog_file, Some(catalog));
        assert_eq!(
            ctx.api.paths().storage_file,
            dir.path().join("data").join("nebula-collection-tracker.json")
        );
    }
}
