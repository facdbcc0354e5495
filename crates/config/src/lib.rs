//! Settings shared by the `movielibrary` CLI and the REST server
//!
//! Both read `config.toml` from the platform config directory:
//!
//! ```toml
//! version = 1
//!
//! [app]
//! log_level = "info"
//!
//! [storage]
//! catalog_path = "movies.json"   # relative paths start at the config directory
//! bootstrap_default_catalog = true
//!
//! [server]
//! host = "127.0.0.1"
//! port = 8080
//! ```
//!
//! Every table and key is optional. `MOVIELIBRARY_*` environment variables
//! override the file (see [`apply_env_overrides`]), and
//! [`ConfigManager::resolve_catalog_path`] turns the result into the path the
//! catalog store is opened with.
//!
//! ```rust,no_run
//! use movielibrary_config::ConfigManager;
//!
//! # fn main() -> Result<(), movielibrary_config::ConfigError> {
//! let manager = ConfigManager::new()?;
//! let config = manager.load_with_env_overrides()?;
//! let catalog = manager.resolve_catalog_path(&config)?;
//! println!("catalog: {}, server: {}", catalog.display(), config.server.bind_address());
//! # Ok(())
//! # }
//! ```

mod app_config;
mod env;
mod error;
mod manager;
mod server_config;
mod storage_config;

pub use app_config::{AppConfig, LogLevel};
pub use env::{
    apply_env_overrides, CATALOG_PATH_VAR, LOG_LEVEL_VAR, SERVER_HOST_VAR, SERVER_PORT_VAR,
};
pub use error::{ConfigError, ConfigProblem, ConfigResult};
pub use manager::ConfigManager;
pub use server_config::ServerConfig;
pub use storage_config::{StorageConfig, DEFAULT_CATALOG_FILE};

use serde::{Deserialize, Serialize};

/// Format version written to new config files
pub const CONFIG_VERSION: u32 = 1;

/// Name of the config file inside the config directory
pub const CONFIG_FILE: &str = "config.toml";

/// One `[table]` of `config.toml`
pub trait ConfigSection {
    /// Table name; problem fields are reported as `<NAME>.<key>`
    const NAME: &'static str;

    /// Appends every problem in this section to `problems`
    fn check(&self, problems: &mut Vec<ConfigProblem>);
}

/// Contents of `config.toml`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Config {
    pub version: u32,
    pub app: AppConfig,
    pub storage: StorageConfig,
    pub server: ServerConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            version: CONFIG_VERSION,
            app: AppConfig::default(),
            storage: StorageConfig::default(),
            server: ServerConfig::default(),
        }
    }
}

impl Config {
    /// All problems across the sections, empty when the config is usable
    pub fn problems(&self) -> Vec<ConfigProblem> {
        let mut problems = Vec::new();
        self.app.check(&mut problems);
        self.storage.check(&mut problems);
        self.server.check(&mut problems);
        problems
    }

    /// Fails with [`ConfigError::Invalid`] listing every problem
    pub fn validate(&self) -> ConfigResult<()> {
        let problems = self.problems();
        if problems.is_empty() {
            Ok(())
        } else {
            Err(ConfigError::Invalid(problems))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_usable() {
        let config = Config::default();
        assert_eq!(config.version, CONFIG_VERSION);
        assert!(config.problems().is_empty());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_problems_from_every_section_are_reported() {
        let mut config = Config::default();
        config.server.host = " ".to_string();
        config.server.port = 0;
        config.storage.catalog_path = Some(std::path::PathBuf::new());

        let fields: Vec<String> = config.problems().into_iter().map(|p| p.field).collect();
        assert_eq!(
            fields,
            ["storage.catalog_path", "server.host", "server.port"]
        );

        match config.validate() {
            Err(ConfigError::Invalid(problems)) => assert_eq!(problems.len(), 3),
            other => panic!("Expected Invalid, got {:?}", other),
        }
    }
}
