use anyhow::{bail, Context, Result};
use clap::{value_parser, Arg, ArgAction, ArgMatches, Command};
use console::style;
use log::LevelFilter;
use movielibrary_config::{Config, ConfigManager};
use movielibrary_library::LibraryManager;
use movielibrary_network::RemoteLibraryAccess;
use std::path::PathBuf;

mod backend;
mod commands;

use backend::Backend;
use commands::ListFilter;

fn title_arg() -> Arg {
    Arg::new("title")
        .required(true)
        .value_name("TITLE")
        .help("Movie title (case-insensitive)")
}

fn build_cli() -> Command {
    Command::new("movielibrary")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Movie rental catalog")
        .arg(
            Arg::new("catalog")
                .short('c')
                .long("catalog")
                .value_name("PATH")
                .help("Path to the catalog file (overrides config)")
                .value_parser(value_parser!(PathBuf))
                .global(true),
        )
        .arg(
            Arg::new("remote")
                .short('r')
                .long("remote")
                .value_name("URL")
                .help("Use the catalog server at URL instead of a local file")
                .global(true),
        )
        .arg(
            Arg::new("config-dir")
                .long("config-dir")
                .value_name("DIR")
                .help("Directory holding config.toml")
                .value_parser(value_parser!(PathBuf))
                .global(true),
        )
        .subcommand(Command::new("init").about("Create the default catalog if it does not exist"))
        .subcommand(
            Command::new("list")
                .about("List movies in the catalog")
                .arg(
                    Arg::new("lent")
                        .long("lent")
                        .help("Show only lent movies")
                        .action(ArgAction::SetTrue)
                        .conflicts_with("available"),
                )
                .arg(
                    Arg::new("available")
                        .long("available")
                        .help("Show only available movies")
                        .action(ArgAction::SetTrue),
                ),
        )
        .subcommand(Command::new("show").about("Show details of a movie").arg(title_arg()))
        .subcommand(Command::new("status").about("Show whether a movie is lent").arg(title_arg()))
        .subcommand(Command::new("lend").about("Lend a movie").arg(title_arg()))
        .subcommand(Command::new("return").about("Return a lent movie").arg(title_arg()))
        .subcommand(
            Command::new("add")
                .about("Add a movie to the catalog")
                .arg(title_arg())
                .arg(
                    Arg::new("length")
                        .short('l')
                        .long("length")
                        .required(true)
                        .value_name("MINUTES")
                        .help("Running time in minutes (max 120)")
                        .value_parser(value_parser!(f64)),
                )
                .arg(
                    Arg::new("description")
                        .short('d')
                        .long("description")
                        .required(true)
                        .value_name("TEXT")
                        .help("Description, 20 to 250 characters"),
                ),
        )
        .subcommand(
            Command::new("delete")
                .about("Delete a movie from the catalog")
                .arg(title_arg())
                .arg(
                    Arg::new("force")
                        .short('f')
                        .long("force")
                        .help("Skip confirmation prompt")
                        .action(ArgAction::SetTrue),
                ),
        )
        .subcommand(Command::new("stats").about("Show catalog statistics"))
        .subcommand(
            Command::new("config")
                .about("Show resolved configuration and paths")
                .arg(
                    Arg::new("init")
                        .long("init")
                        .help("Write a default config.toml if there is none")
                        .action(ArgAction::SetTrue),
                ),
        )
}

fn required<'a>(matches: &'a ArgMatches, id: &str) -> Result<&'a String> {
    matches
        .get_one::<String>(id)
        .ok_or_else(|| anyhow::anyhow!("Missing argument: {}", id))
}

fn catalog_path(matches: &ArgMatches, manager: &ConfigManager, config: &Config) -> Result<PathBuf> {
    match matches.get_one::<PathBuf>("catalog") {
        Some(path) => Ok(path.clone()),
        None => manager
            .resolve_catalog_path(config)
            .context("Failed to resolve catalog path"),
    }
}

/// Starts logging before the config is read so its warnings are shown
///
/// Returns whether `RUST_LOG` chose the filter. If it did not, everything up
/// to `info` is shown until [`apply_log_level`] narrows it.
fn init_logging() -> bool {
    let from_env = std::env::var_os("RUST_LOG").is_some();
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("trace")).init();
    if !from_env {
        log::set_max_level(LevelFilter::Info);
    }
    from_env
}

fn apply_log_level(config: &Config, rust_log_set: bool) {
    if !rust_log_set {
        log::set_max_level(config.app.log_level.level_filter());
    }
}

async fn run(matches: ArgMatches) -> Result<()> {
    let rust_log_set = init_logging();

    let config_manager = match matches.get_one::<PathBuf>("config-dir") {
        Some(dir) => ConfigManager::with_directory(dir.clone()),
        None => ConfigManager::new().context("Failed to locate config directory")?,
    };

    let config = config_manager
        .load_with_env_overrides()
        .context("Failed to load configuration")?;
    apply_log_level(&config, rust_log_set);

    let remote = matches.get_one::<String>("remote");

    match matches.subcommand() {
        Some(("init", _)) => {
            if remote.is_some() {
                bail!("init only applies to a local catalog");
            }
            let path = catalog_path(&matches, &config_manager, &config)?;
            return commands::init_catalog(&path);
        }
        Some(("config", sub)) => {
            let path = catalog_path(&matches, &config_manager, &config)?;
            return commands::show_config(&config_manager, &config, &path, sub.get_flag("init"));
        }
        None => {
            build_cli().print_help()?;
            return Ok(());
        }
        _ => {}
    }

    let mut backend = match remote {
        Some(url) => Backend::Remote(
            RemoteLibraryAccess::new(url)
                .with_context(|| format!("Invalid server URL: {}", url))?,
        ),
        None => {
            let path = catalog_path(&matches, &config_manager, &config)?;
            let manager = LibraryManager::open(&path, config.storage.bootstrap_default_catalog)
                .with_context(|| format!("Failed to open catalog at {}", path.display()))?;
            Backend::Local(manager)
        }
    };
    log::debug!("Using catalog {}", backend.describe());

    match matches.subcommand() {
        Some(("list", sub)) => {
            let filter = if sub.get_flag("lent") {
                ListFilter::Lent
            } else if sub.get_flag("available") {
                ListFilter::Available
            } else {
                ListFilter::All
            };
            commands::list_movies(&mut backend, filter).await
        }
        Some(("show", sub)) => commands::show_movie(&mut backend, required(sub, "title")?).await,
        Some(("status", sub)) => commands::show_status(&mut backend, required(sub, "title")?).await,
        Some(("lend", sub)) => commands::lend_movie(&mut backend, required(sub, "title")?).await,
        Some(("return", sub)) => commands::return_movie(&mut backend, required(sub, "title")?).await,
        Some(("add", sub)) => {
            let length = sub
                .get_one::<f64>("length")
                .copied()
                .ok_or_else(|| anyhow::anyhow!("Missing argument: length"))?;
            commands::add_movie(
                &mut backend,
                required(sub, "title")?,
                length,
                required(sub, "description")?,
            )
            .await
        }
        Some(("delete", sub)) => {
            commands::delete_movie(&mut backend, required(sub, "title")?, sub.get_flag("force"))
                .await
        }
        Some(("stats", _)) => commands::show_stats(&mut backend).await,
        _ => {
            build_cli().print_help()?;
            Ok(())
        }
    }
}

#[tokio::main]
async fn main() {
    let matches = build_cli().get_matches();

    if let Err(e) = run(matches).await {
        eprintln!("{} {:#}", style("Error:").red().bold(), e);
        std::process::exit(1);
    }
}
