//! Finding, reading and writing `config.toml`, and resolving the catalog path

use crate::{
    apply_env_overrides, Config, ConfigError, ConfigResult, CONFIG_FILE, CONFIG_VERSION,
    DEFAULT_CATALOG_FILE,
};
use directories::{ProjectDirs, UserDirs};
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;

/// Configuration of one installation, rooted at its config directory
#[derive(Debug, Clone)]
pub struct ConfigManager {
    config_dir: PathBuf,
}

impl ConfigManager {
    /// Uses the platform config directory
    ///
    /// - Linux: `~/.config/movielibrary/`
    /// - macOS: `~/Library/Application Support/movielibrary/`
    /// - Windows: `%APPDATA%\movielibrary\config\`
    pub fn new() -> ConfigResult<Self> {
        let dirs =
            ProjectDirs::from("", "", "movielibrary").ok_or(ConfigError::NoConfigDirectory)?;
        Ok(Self::with_directory(dirs.config_dir()))
    }

    pub fn with_directory(config_dir: impl Into<PathBuf>) -> Self {
        Self {
            config_dir: config_dir.into(),
        }
    }

    pub fn config_dir(&self) -> &Path {
        &self.config_dir
    }

    pub fn config_path(&self) -> PathBuf {
        self.config_dir.join(CONFIG_FILE)
    }

    /// Copy of the file as it was before the last save
    pub fn backup_path(&self) -> PathBuf {
        self.config_dir.join(format!("{CONFIG_FILE}.backup"))
    }

    /// Reads `config.toml`, or returns the defaults if there is none
    ///
    /// An empty or malformed file is an error. Unusable values are logged
    /// but do not fail the load; [`Config::problems`] lists them.
    pub fn load(&self) -> ConfigResult<Config> {
        let path = self.config_path();
        let text = match fs::read_to_string(&path) {
            Ok(text) => text,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                log::debug!("No config at {}, using defaults", path.display());
                return Ok(Config::default());
            }
            Err(source) => return Err(ConfigError::Read { path, source }),
        };

        if text.trim().is_empty() {
            return Err(ConfigError::Empty { path });
        }

        let config: Config = match toml::from_str(&text) {
            Ok(config) => config,
            Err(source) => return Err(ConfigError::Parse { path, source }),
        };

        if config.version > CONFIG_VERSION {
            log::warn!(
                "{} has format version {}; this build understands up to {}",
                path.display(),
                config.version,
                CONFIG_VERSION
            );
        }
        for problem in config.problems() {
            log::warn!("{}: {}", path.display(), problem);
        }

        Ok(config)
    }

    /// [`ConfigManager::load`] followed by the `MOVIELIBRARY_*` variables
    pub fn load_with_env_overrides(&self) -> ConfigResult<Config> {
        let mut config = self.load()?;
        apply_env_overrides(&mut config, |name| std::env::var(name).ok());
        Ok(config)
    }

    /// Validates and writes `config`
    ///
    /// The previous file, if any, is copied to [`ConfigManager::backup_path`]
    /// first. The new file replaces the old one in a single rename.
    pub fn save(&self, config: &Config) -> ConfigResult<()> {
        config.validate()?;
        let text = toml::to_string_pretty(config)?;

        let path = self.config_path();
        let write_error = |source| ConfigError::Write {
            path: path.clone(),
            source,
        };

        fs::create_dir_all(&self.config_dir).map_err(write_error)?;

        if path.exists() {
            let backup = self.backup_path();
            fs::copy(&path, &backup).map_err(|source| ConfigError::Write {
                path: backup.clone(),
                source,
            })?;
            log::debug!("Kept previous config as {}", backup.display());
        }

        let mut temp_file = NamedTempFile::new_in(&self.config_dir).map_err(write_error)?;
        temp_file.write_all(text.as_bytes()).map_err(write_error)?;
        temp_file
            .persist(&path)
            .map_err(|e| write_error(e.error))?;

        log::info!("Saved config to {}", path.display());
        Ok(())
    }

    /// Writes the default config if no file exists yet
    ///
    /// Returns whether a file was written.
    pub fn initialize(&self) -> ConfigResult<bool> {
        if self.config_path().exists() {
            return Ok(false);
        }
        self.save(&Config::default())?;
        Ok(true)
    }

    /// `movies.json` in the current user's home directory
    pub fn default_catalog_path() -> ConfigResult<PathBuf> {
        UserDirs::new()
            .map(|dirs| dirs.home_dir().join(DEFAULT_CATALOG_FILE))
            .ok_or(ConfigError::NoHomeDirectory)
    }

    /// Path the catalog store should be opened with
    ///
    /// Absolute paths are taken as-is and relative ones are joined to the
    /// config directory. Without a configured path the catalog lives in the
    /// home directory.
    pub fn resolve_catalog_path(&self, config: &Config) -> ConfigResult<PathBuf> {
        match config.storage.catalog_path {
            Some(ref path) if path.is_absolute() => Ok(path.clone()),
            Some(ref path) => Ok(self.config_dir.join(path)),
            None => Self::default_catalog_path(),
        }
    }
}
