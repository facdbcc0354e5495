use anyhow::{Context, Result};
use log::LevelFilter;
use movielibrary_config::ConfigManager;
use movielibrary_library::LibraryManager;
use movielibrary_server::AppState;
use tokio::net::TcpListener;

#[tokio::main]
async fn main() -> Result<()> {
    // Logging comes first so rejected config values are reported
    let rust_log_set = std::env::var_os("RUST_LOG").is_some();
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("trace")).init();
    if !rust_log_set {
        log::set_max_level(LevelFilter::Info);
    }

    let config_manager = ConfigManager::new().context("Failed to locate config directory")?;
    let config = config_manager
        .load_with_env_overrides()
        .context("Failed to load configuration")?;
    if !rust_log_set {
        log::set_max_level(config.app.log_level.level_filter());
    }

    let catalog_path = config_manager
        .resolve_catalog_path(&config)
        .context("Failed to resolve catalog path")?;
    let manager = LibraryManager::open(&catalog_path, config.storage.bootstrap_default_catalog)
        .with_context(|| format!("Failed to open catalog at {}", catalog_path.display()))?;

    let listener = TcpListener::bind(config.server.bind_address())
        .await
        .with_context(|| format!("Failed to bind {}", config.server.bind_address()))?;

    log::info!(
        "Serving {} on http://{}",
        catalog_path.display(),
        listener.local_addr()?
    );

    movielibrary_server::serve(listener, AppState::new(manager), shutdown_signal())
        .await
        .context("Server terminated with an error")?;

    log::info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        log::error!("Failed to listen for Ctrl-C: {}", e);
    }
    log::info!("Shutdown requested");
}
