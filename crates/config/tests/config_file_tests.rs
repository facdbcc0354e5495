//! Config files as users write them

use movielibrary_config::{
    apply_env_overrides, Config, ConfigError, ConfigManager, LogLevel, SERVER_PORT_VAR,
};
use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

fn setup() -> Result<(TempDir, ConfigManager), Box<dyn std::error::Error>> {
    let temp_dir = TempDir::new()?;
    let manager = ConfigManager::with_directory(temp_dir.path().join("movielibrary"));
    Ok((temp_dir, manager))
}

#[test]
fn test_partial_file_fills_in_defaults() -> Result<(), Box<dyn std::error::Error>> {
    let (_temp_dir, manager) = setup()?;
    fs::create_dir_all(manager.config_dir())?;
    fs::write(
        manager.config_path(),
        r#"
[app]
log_level = "debug"

[storage]
catalog_path = "catalogs/movies.json"
"#,
    )?;

    let config = manager.load()?;
    assert_eq!(config.app.log_level, LogLevel::Debug);
    assert!(config.storage.bootstrap_default_catalog);
    assert_eq!(config.server.bind_address(), "127.0.0.1:8080");
    assert_eq!(
        manager.resolve_catalog_path(&config)?,
        manager.config_dir().join("catalogs/movies.json")
    );
    Ok(())
}

#[test]
fn test_saved_file_reads_back() -> Result<(), Box<dyn std::error::Error>> {
    let (_temp_dir, manager) = setup()?;

    let mut config = Config::default();
    config.storage.catalog_path = Some(PathBuf::from("/var/lib/movielibrary/movies.json"));
    config.storage.bootstrap_default_catalog = false;
    config.server.host = "0.0.0.0".to_string();
    manager.save(&config)?;

    assert_eq!(manager.load()?, config);
    Ok(())
}

#[test]
fn test_save_leaves_only_config_and_backup() -> Result<(), Box<dyn std::error::Error>> {
    let (_temp_dir, manager) = setup()?;

    manager.save(&Config::default())?;
    manager.save(&Config::default())?;

    let mut names: Vec<String> = fs::read_dir(manager.config_dir())?
        .filter_map(|entry| entry.ok())
        .map(|entry| entry.file_name().to_string_lossy().into_owned())
        .collect();
    names.sort();
    assert_eq!(names, ["config.toml", "config.toml.backup"]);
    Ok(())
}

#[test]
fn test_out_of_range_port_does_not_parse() -> Result<(), Box<dyn std::error::Error>> {
    let (_temp_dir, manager) = setup()?;
    fs::create_dir_all(manager.config_dir())?;
    fs::write(manager.config_path(), "[server]\nport = 70000\n")?;

    assert!(matches!(manager.load(), Err(ConfigError::Parse { .. })));
    Ok(())
}

#[test]
fn test_unknown_keys_are_ignored() -> Result<(), Box<dyn std::error::Error>> {
    let (_temp_dir, manager) = setup()?;
    fs::create_dir_all(manager.config_dir())?;
    fs::write(manager.config_path(), "[server]\nport = 8081\nworkers = 4\n")?;

    assert_eq!(manager.load()?.server.port, 8081);
    Ok(())
}

#[test]
fn test_env_port_overrides_file_unless_unusable() -> Result<(), Box<dyn std::error::Error>> {
    let (_temp_dir, manager) = setup()?;
    fs::create_dir_all(manager.config_dir())?;
    fs::write(manager.config_path(), "[server]\nport = 8081\n")?;

    let mut config = manager.load()?;
    let skipped = apply_env_overrides(&mut config, |name| {
        (name == SERVER_PORT_VAR).then(|| "9191".to_string())
    });
    assert!(skipped.is_empty());
    assert_eq!(config.server.port, 9191);

    let mut config = manager.load()?;
    let skipped = apply_env_overrides(&mut config, |name| {
        (name == SERVER_PORT_VAR).then(|| "bogus".to_string())
    });
    assert_eq!(skipped.len(), 1);
    assert_eq!(config.server.port, 8081);
    Ok(())
}
