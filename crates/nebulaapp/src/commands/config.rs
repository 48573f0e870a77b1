use crate::commands::{CmdResult, NebulaPaths};
use crate::config::NebulaConfig;
use crate::error::Result;

/// Effective configuration, after env vars, config file and CLI overrides.
pub fn run(config: &NebulaConfig, paths: &NebulaPaths, catalog: &str) -> Result<CmdResult> {
    let unset = || "(not set)".to_string();
    let display = |p: &Option<std::path::PathBuf>| {
        p.as_ref()
            .map(|p| p.display().to_string())
            .unwrap_or_else(unset)
    };

    let mut result = CmdResult::default();
    result.config = vec![
        ("api_base_url".to_string(), config.api_base_url.clone()),
        ("catalog_file".to_string(), display(&config.catalog_file)),
        ("catalog".to_string(), catalog.to_string()),
        ("data_dir".to_string(), paths.data_dir.display().to_string()),
        (
            "storage_file".to_string(),
            paths.storage_file.display().to_string(),
        ),
        ("config_file".to_string(), display(&paths.config_file)),
    ];
    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn lists_every_setting() {
        let paths = NebulaPaths {
            data_dir: PathBuf::from("/data"),
            storage_file: PathBuf::from("/data/nebula-collection-tracker.json"),
            config_file: None,
        };
        let result = run(&NebulaConfig::default(), &paths, "http://localhost:8000").unwrap();
        let keys: Vec<_> = result.config.iter().map(|(k, _)| k.as_str()).collect();
        assert_eq!(
            keys,
            ["api_base_url", "catalog_file", "catalog", "data_dir", "storage_file", "config_file"]
        );
        assert_eq!(result.config[1].1, "(not set)");
        assert_eq!(result.config[0].1, "http://localhost:8000");
    }
}
