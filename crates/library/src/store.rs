//! JSON file backed catalog store
//!
//! The store owns the in-memory movie list and keeps it identical to the
//! catalog file: every mutation is followed by a whole-file rewrite, and a
//! mutation whose write fails is undone in memory.

use crate::bootstrap;
use crate::error::{LibraryError, LibraryResult};
use log::{debug, info};
use movielibrary_core::Movie;
use std::collections::HashSet;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;

/// In-memory catalog synchronized with a JSON file
#[derive(Debug)]
pub struct CatalogStore {
    path: PathBuf,
    movies: Vec<Movie>,
}

impl CatalogStore {
    /// Loads the catalog at `path`
    ///
    /// Fails with `ReadError` if the file is missing or unreadable and with
    /// `ParseError` if it is empty, not a JSON array of valid movies, or
    /// lists the same title twice.
    pub fn load(path: impl Into<PathBuf>) -> LibraryResult<Self> {
        let path = path.into();
        let movies = read_catalog(&path)?;
        info!("Loaded {} movies from {}", movies.len(), path.display());
        Ok(Self { path, movies })
    }

    /// Like [`CatalogStore::load`], but first writes the bundled default
    /// catalog when `bootstrap` is set and the file does not exist
    pub fn open(path: impl Into<PathBuf>, bootstrap: bool) -> LibraryResult<Self> {
        let path = path.into();
        if bootstrap {
            bootstrap::ensure_catalog(&path)?;
        }
        Self::load(path)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn movies(&self) -> &[Movie] {
        &self.movies
    }

    pub fn len(&self) -> usize {
        self.movies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.movies.is_empty()
    }

    /// Case-insensitive, whitespace-trimmed exact title lookup
    pub fn find_by_title(&self, title: &str) -> Option<&Movie> {
        self.movies.iter().find(|movie| movie.matches_title(title))
    }

    fn position(&self, title: &str) -> LibraryResult<usize> {
        self.movies
            .iter()
            .position(|movie| movie.matches_title(title))
            .ok_or_else(|| LibraryError::NotFound {
                title: title.trim().to_string(),
            })
    }

    /// Re-reads the catalog file. The current list is kept if that fails.
    pub fn reload(&mut self) -> LibraryResult<()> {
        let movies = read_catalog(&self.path)?;
        debug!("Reloaded {} movies from {}", movies.len(), self.path.display());
        self.movies = movies;
        Ok(())
    }

    /// Rewrites the whole catalog file from memory
    pub fn write_all(&self) -> LibraryResult<()> {
        let json = serde_json::to_string_pretty(&self.movies)?;
        write_atomic(&self.path, &json)?;
        debug!("Wrote {} movies to {}", self.movies.len(), self.path.display());
        Ok(())
    }

    /// Reloads and reports whether `title` is currently lent
    pub fn lent_status(&mut self, title: &str) -> LibraryResult<bool> {
        self.reload()?;
        self.find_by_title(title)
            .map(Movie::is_lent)
            .ok_or_else(|| LibraryError::NotFound {
                title: title.trim().to_string(),
            })
    }

    pub(crate) fn set_lent(&mut self, title: &str, lent: bool) -> LibraryResult<()> {
        let index = self.position(title)?;
        let previous = self.movies[index].is_lent();
        self.movies[index].set_lent(lent);

        if let Err(e) = self.write_all() {
            self.movies[index].set_lent(previous);
            return Err(e);
        }
        Ok(())
    }

    pub(crate) fn insert(&mut self, movie: Movie) -> LibraryResult<()> {
        if self.find_by_title(movie.title()).is_some() {
            return Err(LibraryError::DuplicateTitle {
                title: movie.title().to_string(),
            });
        }

        self.movies.push(movie);
        if let Err(e) = self.write_all() {
            self.movies.pop();
            return Err(e);
        }
        Ok(())
    }

    pub(crate) fn remove(&mut self, title: &str) -> LibraryResult<Movie> {
        let index = self.position(title)?;
        let movie = self.movies.remove(index);

        if let Err(e) = self.write_all() {
            self.movies.insert(index, movie);
            return Err(e);
        }
        Ok(movie)
    }
}

fn read_catalog(path: &Path) -> LibraryResult<Vec<Movie>> {
    let contents = fs::read_to_string(path).map_err(|source| LibraryError::ReadError {
        path: path.to_path_buf(),
        source,
    })?;

    if contents.trim().is_empty() {
        return Err(LibraryError::ParseError {
            path: path.to_path_buf(),
            reason: "catalog file is empty".to_string(),
        });
    }

    let movies: Vec<Movie> =
        serde_json::from_str(&contents).map_err(|e| LibraryError::ParseError {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;

    let mut seen = HashSet::with_capacity(movies.len());
    for movie in &movies {
        if !seen.insert(movie.normalized_title()) {
            return Err(LibraryError::ParseError {
                path: path.to_path_buf(),
                reason: format!("duplicate title '{}'", movie.title()),
            });
        }
    }

    Ok(movies)
}

/// Writes `contents` to a temp file next to `path` and renames it into place
pub(crate) fn write_atomic(path: &Path, contents: &str) -> LibraryResult<()> {
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    if !dir.exists() {
        fs::create_dir_all(dir).map_err(|source| LibraryError::DirectoryCreationError {
            path: dir.to_path_buf(),
            source,
        })?;
        info!("Created catalog directory: {}", dir.display());
    }

    let write_error = |source| LibraryError::WriteError {
        path: path.to_path_buf(),
        source,
    };

    let mut temp_file = NamedTempFile::new_in(dir).map_err(write_error)?;
    temp_file
        .write_all(contents.as_bytes())
        .map_err(write_error)?;
    temp_file.flush().map_err(write_error)?;

    // Temp files are created 0600; the replaced catalog keeps its mode
    if let Ok(metadata) = fs::metadata(path) {
        temp_file
            .as_file()
            .set_permissions(metadata.permissions())
            .map_err(write_error)?;
    }

    temp_file
        .persist(path)
        .map_err(|e| write_error(e.error))?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    const TWO_MOVIES: &str = r#"[
  {
    "title": "The Trollgirl",
    "movieLength": 100.0,
    "description": "When a girl is kidnapped by a troll, and turned into a troll.",
    "isLent": false
  },
  {
    "title": "Loverboy",
    "movieLength": 97.0,
    "description": "Based on a true story, about a boy who marries his crush twice over.",
    "isLent": true
  }
]"#;

    fn setup_store(contents: &str) -> (TempDir, PathBuf) {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let path = temp_dir.path().join("movies.json");
        fs::write(&path, contents).expect("Failed to write catalog");
        (temp_dir, path)
    }

    #[test]
    fn test_load() {
        let (_temp_dir, path) = setup_store(TWO_MOVIES);
        let store = CatalogStore::load(&path).expect("Should load");

        assert_eq!(store.len(), 2);
        assert_eq!(store.movies()[0].title(), "The Trollgirl");
        assert!(store.movies()[1].is_lent());
        assert_eq!(store.path(), path.as_path());
    }

    #[test]
    fn test_load_missing_file() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let result = CatalogStore::load(temp_dir.path().join("missing.json"));
        assert!(matches!(result, Err(LibraryError::ReadError { .. })));
    }

    #[test]
    fn test_load_rejects_empty_file() {
        let (_temp_dir, path) = setup_store("   \n");
        assert!(matches!(
            CatalogStore::load(&path),
            Err(LibraryError::ParseError { .. })
        ));
    }

    #[test]
    fn test_load_rejects_non_array() {
        let (_temp_dir, path) = setup_store(r#"{"title": "Loverboy"}"#);
        assert!(matches!(
            CatalogStore::load(&path),
            Err(LibraryError::ParseError { .. })
        ));
    }

    #[test]
    fn test_load_rejects_duplicate_titles() {
        let contents = r#"[
            {"title": "Loverboy", "movieLength": 97, "description": "Based on a true story about a boy."},
            {"title": " loverboy ", "movieLength": 90, "description": "Another description long enough."}
        ]"#;
        let (_temp_dir, path) = setup_store(contents);

        match CatalogStore::load(&path) {
            Err(LibraryError::ParseError { reason, .. }) => {
                assert!(reason.contains("duplicate title"))
            }
            other => panic!("Expected ParseError, got {:?}", other),
        }
    }

    #[test]
    fn test_find_by_title_normalizes() {
        let (_temp_dir, path) = setup_store(TWO_MOVIES);
        let store = CatalogStore::load(&path).expect("Should load");

        assert!(store.find_by_title("  the trollgirl ").is_some());
        assert!(store.find_by_title("LOVERBOY").is_some());
        assert!(store.find_by_title("Troll").is_none());
    }

    #[test]
    fn test_reload_keeps_list_on_failure() {
        let (_temp_dir, path) = setup_store(TWO_MOVIES);
        let mut store = CatalogStore::load(&path).expect("Should load");

        fs::write(&path, "not json").expect("Failed to corrupt catalog");
        assert!(store.reload().is_err());
        assert_eq!(store.len(), 2);
    }

    #[test]
    fn test_reload_picks_up_external_changes() {
        let (_temp_dir, path) = setup_store(TWO_MOVIES);
        let mut store = CatalogStore::load(&path).expect("Should load");

        let edited = TWO_MOVIES.replace("\"isLent\": true", "\"isLent\": false");
        fs::write(&path, edited).expect("Failed to edit catalog");

        assert!(!store.lent_status("Loverboy").expect("Should find"));
    }

    #[test]
    fn test_write_all_is_pretty_json() {
        let (_temp_dir, path) = setup_store(TWO_MOVIES);
        let store = CatalogStore::load(&path).expect("Should load");

        store.write_all().expect("Should write");
        let written = fs::read_to_string(&path).expect("Should read");

        assert!(written.starts_with("[\n  {\n    \"title\""));
        assert!(written.contains("\"movieLength\": 97.0"));
        assert!(written.contains("\"isLent\": true"));
    }

    #[test]
    fn test_lent_status_not_found() {
        let (_temp_dir, path) = setup_store(TWO_MOVIES);
        let mut store = CatalogStore::load(&path).expect("Should load");

        assert!(matches!(
            store.lent_status("Jaws"),
            Err(LibraryError::NotFound { .. })
        ));
    }

    #[test]
    fn test_set_lent_persists() {
        let (_temp_dir, path) = setup_store(TWO_MOVIES);
        let mut store = CatalogStore::load(&path).expect("Should load");

        store.set_lent("the trollgirl", true).expect("Should lend");

        let reloaded = CatalogStore::load(&path).expect("Should load");
        assert!(reloaded
            .find_by_title("The Trollgirl")
            .expect("Should find")
            .is_lent());
    }

    #[test]
    fn test_failed_write_rolls_back() {
        let (_temp_dir, path) = setup_store(TWO_MOVIES);
        let mut store = CatalogStore::load(&path).expect("Should load");

        // A directory in place of the catalog file makes the rename fail
        fs::remove_file(&path).expect("Should remove catalog");
        fs::create_dir(&path).expect("Should create blocking directory");
        fs::write(path.join("keep"), "x").expect("Should fill directory");

        assert!(matches!(
            store.set_lent("The Trollgirl", true),
            Err(LibraryError::WriteError { .. })
        ));
        assert!(!store.find_by_title("The Trollgirl").expect("Should find").is_lent());

        assert!(store.remove("Loverboy").is_err());
        assert_eq!(store.len(), 2);
        assert_eq!(store.movies()[1].title(), "Loverboy");
    }

    #[test]
    fn test_insert_rejects_duplicate() {
        let (_temp_dir, path) = setup_store(TWO_MOVIES);
        let mut store = CatalogStore::load(&path).expect("Should load");

        let movie = Movie::new(
            "LOVERBOY",
            80.0,
            "A different movie with the same name.",
        )
        .expect("Valid movie");

        assert!(matches!(
            store.insert(movie),
            Err(LibraryError::DuplicateTitle { .. })
        ));
        assert_eq!(store.len(), 2);
    }

    #[test]
    fn test_open_bootstraps_missing_catalog() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let path = temp_dir.path().join("nested").join("movies.json");

        let store = CatalogStore::open(&path, true).expect("Should bootstrap");
        assert!(path.exists());
        assert!(store.find_by_title("Loverboy").is_some());
    }

    #[test]
    fn test_open_without_bootstrap_requires_file() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let path = temp_dir.path().join("movies.json");

        assert!(matches!(
            CatalogStore::open(&path, false),
            Err(LibraryError::ReadError { .. })
        ));
        assert!(!path.exists());
    }
}
