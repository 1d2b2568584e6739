//! Result storage configuration

use serde::Deserialize;
use std::path::PathBuf;

/// Where result files are kept
#[derive(Debug, Clone, Deserialize)]
pub struct StorageConfig {
    /// Directory for result files, created on demand
    #[serde(default = "default_results_dir")]
    pub results_dir: PathBuf,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            results_dir: default_results_dir(),
        }
    }
}

fn default_results_dir() -> PathBuf {
    PathBuf::from("results")
}
