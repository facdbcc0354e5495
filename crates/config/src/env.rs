//! `MOVIELIBRARY_*` environment overrides
//!
//! Each variable replaces one key of `config.toml`. A value that cannot be
//! used is logged and skipped; the setting from the file stays in effect.

use crate::{Config, ConfigProblem, LogLevel};
use std::path::PathBuf;

pub const CATALOG_PATH_VAR: &str = "MOVIELIBRARY_STORAGE_CATALOG_PATH";
pub const SERVER_HOST_VAR: &str = "MOVIELIBRARY_SERVER_HOST";
pub const SERVER_PORT_VAR: &str = "MOVIELIBRARY_SERVER_PORT";
pub const LOG_LEVEL_VAR: &str = "MOVIELIBRARY_APP_LOG_LEVEL";

/// Applies the variables `lookup` returns and reports the ones it skipped
///
/// [`crate::ConfigManager::load_with_env_overrides`] passes
/// `std::env::var`; tests pass a map.
pub fn apply_env_overrides<F>(config: &mut Config, lookup: F) -> Vec<ConfigProblem>
where
    F: Fn(&str) -> Option<String>,
{
    let mut skipped = Vec::new();

    if let Some(path) = lookup(CATALOG_PATH_VAR) {
        if path.trim().is_empty() {
            skipped.push(ConfigProblem::new(CATALOG_PATH_VAR, "is set but empty"));
        } else {
            config.storage.catalog_path = Some(PathBuf::from(path));
        }
    }

    if let Some(host) = lookup(SERVER_HOST_VAR) {
        if host.trim().is_empty() {
            skipped.push(ConfigProblem::new(SERVER_HOST_VAR, "is set but empty"));
        } else {
            config.server.host = host.trim().to_string();
        }
    }

    if let Some(port) = lookup(SERVER_PORT_VAR) {
        match port.trim().parse::<u16>() {
            Ok(p) if p > 0 => config.server.port = p,
            _ => skipped.push(ConfigProblem::new(
                SERVER_PORT_VAR,
                format!("'{port}' is not a port number between 1 and 65535"),
            )),
        }
    }

    if let Some(level) = lookup(LOG_LEVEL_VAR) {
        match level.parse::<LogLevel>() {
            Ok(l) => config.app.log_level = l,
            Err(problem) => skipped.push(ConfigProblem::new(LOG_LEVEL_VAR, problem.message)),
        }
    }

    for problem in &skipped {
        log::warn!("Ignoring {}", problem);
    }

    skipped
}
