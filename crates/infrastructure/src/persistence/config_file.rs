//! Configuration file loading

use std::path::Path;

use covenant_application::config::HarnessConfig;

use super::LoadError;

/// Loads the harness configuration from a YAML file and applies process
/// environment overrides (`COVENANT_TOKEN`, `COVENANT_BASE_URL`) on top.
///
/// # Errors
///
/// Returns a [`LoadError`] if the file cannot be read or parsed.
pub fn load_config(path: &Path) -> Result<HarnessConfig, LoadError> {
    let content = std::fs::read_to_string(path).map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let mut config: HarnessConfig =
        serde_yaml::from_str(&content).map_err(|e| LoadError::Parse {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
    config.apply_env_overrides();
    Ok(config)
}
