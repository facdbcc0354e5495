use anyhow::{Context, Result};
use console::style;
use movielibrary_config::{Config, ConfigManager};
use movielibrary_core::Movie;
use movielibrary_library::ensure_catalog;
use std::path::Path;

use crate::backend::Backend;

/// Which movies `list` shows
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListFilter {
    All,
    Lent,
    Available,
}

impl ListFilter {
    fn accepts(&self, movie: &Movie) -> bool {
        match self {
            ListFilter::All => true,
            ListFilter::Lent => movie.is_lent(),
            ListFilter::Available => movie.is_available(),
        }
    }
}

/// Write the default catalog if the file does not exist yet
pub fn init_catalog(catalog_path: &Path) -> Result<()> {
    let created = ensure_catalog(catalog_path)
        .with_context(|| format!("Failed to create catalog at {}", catalog_path.display()))?;

    if created {
        println!(
            "{} Created default catalog at {}",
            style("✓").green().bold(),
            catalog_path.display()
        );
    } else {
        println!("Catalog already exists at {}", catalog_path.display());
    }
    Ok(())
}

/// List movies in the catalog
pub async fn list_movies(backend: &mut Backend, filter: ListFilter) -> Result<()> {
    let movies: Vec<Movie> = backend
        .movies()
        .await?
        .into_iter()
        .filter(|m| filter.accepts(m))
        .collect();

    if movies.is_empty() {
        println!("No movies match.");
        return Ok(());
    }

    println!("\n{} Movies in Catalog", style(movies.len()).bold().cyan());
    println!("{}", "=".repeat(80));

    for movie in &movies {
        print_movie_summary(movie);
    }

    Ok(())
}

/// Show all details of one movie
pub async fn show_movie(backend: &mut Backend, title: &str) -> Result<()> {
    let movie = backend.movie(title).await?;

    println!("\n{}", style(movie.title()).bold().cyan());
    println!("{}", "=".repeat(80));
    println!("Length: {}", format_length(movie.movie_length()));
    println!("Status: {}", lent_label(movie.is_lent()));
    println!("\n{}", movie.description());

    Ok(())
}

pub async fn show_status(backend: &mut Backend, title: &str) -> Result<()> {
    let lent = backend.lent_status(title).await?;
    println!("{}: {}", title.trim(), lent_label(lent));
    Ok(())
}

pub async fn lend_movie(backend: &mut Backend, title: &str) -> Result<()> {
    backend.lend(title).await?;
    println!("{} Lent: {}", style("✓").green().bold(), title.trim());
    Ok(())
}

pub async fn return_movie(backend: &mut Backend, title: &str) -> Result<()> {
    backend.return_movie(title).await?;
    println!("{} Returned: {}", style("✓").green().bold(), title.trim());
    Ok(())
}

/// Add a new movie
pub async fn add_movie(
    backend: &mut Backend,
    title: &str,
    movie_length: f64,
    description: &str,
) -> Result<()> {
    let movie = backend.add_movie(title, movie_length, description).await?;

    println!("{} Movie added successfully!", style("✓").green().bold());
    println!("  Title: {}", movie.title());
    println!("  Length: {}", format_length(movie.movie_length()));

    Ok(())
}

/// Delete a movie, asking first unless `force` is set
pub async fn delete_movie(backend: &mut Backend, title: &str, force: bool) -> Result<()> {
    let movie = backend.movie(title).await?;

    if !force {
        println!("Are you sure you want to delete '{}'? (y/N)", movie.title());
        let mut input = String::new();
        std::io::stdin()
            .read_line(&mut input)
            .context("Failed to read confirmation")?;

        if !input.trim().eq_ignore_ascii_case("y") {
            println!("Deletion cancelled.");
            return Ok(());
        }
    }

    backend.delete_movie(movie.title()).await?;
    println!("{} Movie deleted: {}", style("✓").green().bold(), movie.title());

    Ok(())
}

/// Show catalog statistics
pub async fn show_stats(backend: &mut Backend) -> Result<()> {
    let stats = backend.stats().await?;

    println!("\n{}", style("Catalog Statistics").bold().cyan());
    println!("{}", "=".repeat(80));
    println!("Catalog: {}", backend.describe());
    println!("Total Movies: {}", style(stats.total).bold());
    println!("Lent: {}", style(stats.lent).bold());
    println!("Available: {}", style(stats.available).bold());
    println!("Total Length: {}", format_length(stats.total_minutes));

    Ok(())
}

/// Print the resolved configuration, writing a default config file first if `init` is set
pub fn show_config(
    manager: &ConfigManager,
    config: &Config,
    catalog_path: &Path,
    init: bool,
) -> Result<()> {
    if init {
        let created = manager
            .initialize()
            .with_context(|| format!("Failed to write {}", manager.config_path().display()))?;
        if created {
            println!(
                "{} Wrote default config to {}",
                style("✓").green().bold(),
                manager.config_path().display()
            );
        } else {
            println!("Config already exists at {}", manager.config_path().display());
        }
    }

    println!("\n{}", style("Configuration").bold().cyan());
    println!("{}", "=".repeat(80));
    println!("Config file: {}", manager.config_path().display());
    println!("Catalog: {}", catalog_path.display());
    println!(
        "Bootstrap default catalog: {}",
        config.storage.bootstrap_default_catalog
    );
    println!("Server address: {}", config.server.bind_address());
    println!("Log level: {}", config.app.log_level);

    for problem in config.problems() {
        println!("{} {}", style("!").yellow().bold(), problem);
    }

    Ok(())
}

fn print_movie_summary(movie: &Movie) {
    println!(
        "{} {}",
        style(truncate(movie.title(), 50)).bold(),
        style(format!("({})", format_length(movie.movie_length()))).dim()
    );
    println!("  {}", lent_label(movie.is_lent()));
    println!("  {}", truncate(movie.description(), 76));
    println!();
}

fn lent_label(lent: bool) -> String {
    if lent {
        style("lent").yellow().to_string()
    } else {
        style("available").green().to_string()
    }
}

fn format_length(minutes: f64) -> String {
    let total_seconds = (minutes * 60.0).round().max(0.0) as u64;
    let hours = total_seconds / 3600;
    let mins = (total_seconds % 3600) / 60;
    let seconds = total_seconds % 60;

    match (hours, seconds) {
        (0, 0) => format!("{}m", mins),
        (0, s) => format!("{}m {}s", mins, s),
        (h, 0) => format!("{}h {}m", h, mins),
        (h, s) => format!("{}h {}m {}s", h, mins, s),
    }
}

fn truncate(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max_len.saturating_sub(3)).collect();
        format!("{}...", kept)
    }
}

#[cfg(test)]
mod tests;
