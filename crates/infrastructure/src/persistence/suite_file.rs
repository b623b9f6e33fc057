//! Suite file loading

use std::path::Path;

use covenant_domain::case::Suite;

use super::LoadError;

/// Loads a suite from a YAML file.
///
/// # Errors
///
/// Returns a [`LoadError`] if the file cannot be read or does not describe
/// a valid suite.
pub fn load_suite(path: &Path) -> Result<Suite, LoadError> {
    let content = std::fs::read_to_string(path).map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    serde_yaml::from_str(&content).map_err(|e| LoadError::Parse {
        path: path.to_path_buf(),
        message: e.to_string(),
    })
}
