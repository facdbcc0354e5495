use crate::{ConfigProblem, ConfigSection};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Catalog file name used when `catalog_path` is unset
pub const DEFAULT_CATALOG_FILE: &str = "movies.json";

/// `[storage]`: where the catalog file lives
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct StorageConfig {
    /// Unset means `movies.json` in the home directory; relative paths are
    /// taken from the config directory
    #[serde(skip_serializing_if = "Option::is_none")]
    pub catalog_path: Option<PathBuf>,

    /// Write the two-movie starter catalog if the file is missing
    pub bootstrap_default_catalog: bool,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            catalog_path: None,
            bootstrap_default_catalog: true,
        }
    }
}

impl ConfigSection for StorageConfig {
    const NAME: &'static str = "storage";

    fn check(&self, problems: &mut Vec<ConfigProblem>) {
        if matches!(self.catalog_path, Some(ref path) if path.as_os_str().is_empty()) {
            problems.push(ConfigProblem::in_section(
                Self::NAME,
                "catalog_path",
                "must not be empty; remove the key to use the default",
            ));
        }
    }
}
