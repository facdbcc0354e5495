use super::*;
use movielibrary_library::{LibraryManager, DEFAULT_CATALOG};
use std::path::PathBuf;
use tempfile::TempDir;

fn setup_backend() -> (TempDir, PathBuf, Backend) {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("movies.json");
    std::fs::write(&path, DEFAULT_CATALOG).unwrap();
    let manager = LibraryManager::open(&path, false).unwrap();
    (temp_dir, path, Backend::Local(manager))
}

#[tokio::test]
async fn test_init_catalog_creates_file_once() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("catalogs").join("movies.json");

    init_catalog(&path).unwrap();
    assert!(path.exists());

    std::fs::write(&path, "[]").unwrap();
    init_catalog(&path).unwrap();
    assert_eq!(std::fs::read_to_string(&path).unwrap(), "[]");
}

#[tokio::test]
async fn test_list_movies_with_filters() {
    let (_temp, _path, mut backend) = setup_backend();

    list_movies(&mut backend, ListFilter::All).await.unwrap();
    list_movies(&mut backend, ListFilter::Lent).await.unwrap();
    list_movies(&mut backend, ListFilter::Available).await.unwrap();
}

#[tokio::test]
async fn test_lend_then_return() {
    let (_temp, _path, mut backend) = setup_backend();

    lend_movie(&mut backend, "Loverboy").await.unwrap();
    assert!(backend.lent_status("loverboy").await.unwrap());

    let err = lend_movie(&mut backend, "Loverboy").await.unwrap_err();
    assert_eq!(err.to_string(), "'Loverboy' is already lent out");

    return_movie(&mut backend, "Loverboy").await.unwrap();
    assert!(!backend.lent_status("Loverboy").await.unwrap());
}

#[tokio::test]
async fn test_show_unknown_movie() {
    let (_temp, _path, mut backend) = setup_backend();

    let err = show_movie(&mut backend, "Jaws").await.unwrap_err();
    assert_eq!(err.to_string(), "No movie titled 'Jaws'");
    assert!(show_status(&mut backend, "Jaws").await.is_err());
}

#[tokio::test]
async fn test_add_movie_persists() {
    let (_temp, path, mut backend) = setup_backend();

    add_movie(
        &mut backend,
        "Jaws",
        118.5,
        "A great white shark terrorizes a beach town.",
    )
    .await
    .unwrap();

    let written = std::fs::read_to_string(&path).unwrap();
    assert!(written.contains("\"title\": \"Jaws\""));
    assert!(written.contains("\"movieLength\": 118.5"));
}

#[tokio::test]
async fn test_add_invalid_movie_reports_field() {
    let (_temp, _path, mut backend) = setup_backend();

    let err = add_movie(&mut backend, "Jaws", 118.0, "Too short")
        .await
        .unwrap_err();
    assert!(err.to_string().starts_with("description:"));
}

#[tokio::test]
async fn test_delete_movie_forced() {
    let (_temp, _path, mut backend) = setup_backend();

    delete_movie(&mut backend, "the trollgirl", true).await.unwrap();
    assert_eq!(backend.movies().await.unwrap().len(), 1);

    let err = delete_movie(&mut backend, "Loverboy", true).await.unwrap_err();
    assert_eq!(
        err.to_string(),
        "The last movie in the catalog cannot be deleted"
    );
}

#[tokio::test]
async fn test_stats() {
    let (_temp, _path, mut backend) = setup_backend();
    lend_movie(&mut backend, "The Trollgirl").await.unwrap();

    let stats = backend.stats().await.unwrap();
    assert_eq!(stats.total, 2);
    assert_eq!(stats.lent, 1);
    show_stats(&mut backend).await.unwrap();
}

#[tokio::test]
async fn test_storage_errors_keep_cause() {
    let (_temp, path, mut backend) = setup_backend();
    std::fs::write(&path, "not json").unwrap();

    let err = backend.movies().await.unwrap_err();
    assert!(err.to_string().starts_with("The catalog at"));
    assert!(format!("{:#}", err).contains("Failed to parse catalog"));
}

#[test]
fn test_format_length() {
    assert_eq!(format_length(45.0), "45m");
    assert_eq!(format_length(97.0), "1h 37m");
    assert_eq!(format_length(118.5), "1h 58m 30s");
    assert_eq!(format_length(0.5), "0m 30s");
    assert_eq!(format_length(59.9999), "1h 0m");
}

#[test]
fn test_truncate() {
    assert_eq!(truncate("Short", 10), "Short");
    assert_eq!(truncate("This is a very long title", 10), "This is...");
    assert_eq!(truncate("Amélie Poulain", 9), "Amélie...");
}

#[test]
fn test_list_filter() {
    let mut movie = Movie::new(
        "Loverboy",
        97.0,
        "Based on a true story, about a boy who marries his crush twice over.",
    )
    .unwrap();

    assert!(ListFilter::Available.accepts(&movie));
    movie.set_lent(true);
    assert!(ListFilter::Lent.accepts(&movie));
    assert!(!ListFilter::Available.accepts(&movie));
    assert!(ListFilter::All.accepts(&movie));
}

#[test]
fn test_show_config_init_writes_file_once() {
    let temp_dir = TempDir::new().unwrap();
    let manager = movielibrary_config::ConfigManager::with_directory(temp_dir.path().join("cfg"));
    let config = movielibrary_config::Config::default();
    let catalog = temp_dir.path().join("movies.json");

    show_config(&manager, &config, &catalog, true).unwrap();
    assert!(manager.config_path().exists());

    std::fs::write(manager.config_path(), "[server]\nport = 9000\n").unwrap();
    show_config(&manager, &config, &catalog, true).unwrap();
    assert_eq!(manager.load().unwrap().server.port, 9000);
}
