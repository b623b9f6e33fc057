//! File loaders
//!
//! Suites and harness configuration are plain YAML files; loading failures
//! are configuration errors, fatal before any request is sent.

mod config_file;
mod suite_file;

use std::path::PathBuf;

use thiserror::Error;

pub use config_file::load_config;
pub use suite_file::load_suite;

/// Failures while loading a suite or configuration file.
#[derive(Debug, Error)]
pub enum LoadError {
    /// The file could not be read.
    #[error("failed to read {path}: {source}")]
    Io {
        /// The path that failed.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// The file contents did not parse.
    #[error("failed to parse {path}: {message}")]
    Parse {
        /// The path that failed.
        path: PathBuf,
        /// Parser detail.
        message: String,
    },
}
