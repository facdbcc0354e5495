use crate::error::{LibraryError, LibraryResult};
use crate::store::CatalogStore;
use log::info;
use movielibrary_core::{Movie, Validator};
use std::path::PathBuf;

/// Lend/return/add/delete on top of a [`CatalogStore`]
///
/// Each operation checks the business rules (a movie is lent at most once,
/// titles are unique, the catalog never becomes empty) and then goes through
/// the store, which persists immediately.
#[derive(Debug)]
pub struct LibraryManager {
    store: CatalogStore,
}

impl LibraryManager {
    pub fn new(store: CatalogStore) -> Self {
        Self { store }
    }

    /// Opens the catalog at `path`, bootstrapping it if requested
    pub fn open(path: impl Into<PathBuf>, bootstrap: bool) -> LibraryResult<Self> {
        Ok(Self::new(CatalogStore::open(path, bootstrap)?))
    }

    pub fn store(&self) -> &CatalogStore {
        &self.store
    }

    /// Current catalog contents, re-read from disk
    pub fn list_movies(&mut self) -> LibraryResult<Vec<Movie>> {
        self.store.reload()?;
        Ok(self.store.movies().to_vec())
    }

    pub fn get_movie(&mut self, title: &str) -> LibraryResult<Movie> {
        self.store.reload()?;
        self.store
            .find_by_title(title)
            .cloned()
            .ok_or_else(|| not_found(title))
    }

    pub fn lent_status(&mut self, title: &str) -> LibraryResult<bool> {
        self.store.lent_status(title)
    }

    /// Marks an available movie as lent
    pub fn lend(&mut self, title: &str) -> LibraryResult<()> {
        if self.store.lent_status(title)? {
            return Err(LibraryError::AlreadyLent {
                title: self.display_title(title),
            });
        }

        self.store.set_lent(title, true)?;
        info!("Lent '{}'", self.display_title(title));
        Ok(())
    }

    /// Marks a lent movie as available again
    pub fn return_movie(&mut self, title: &str) -> LibraryResult<()> {
        if !self.store.lent_status(title)? {
            return Err(LibraryError::NotLent {
                title: self.display_title(title),
            });
        }

        self.store.set_lent(title, false)?;
        info!("Returned '{}'", self.display_title(title));
        Ok(())
    }

    /// Creates a movie from raw fields and appends it to the catalog
    pub fn add_movie(
        &mut self,
        title: &str,
        movie_length: f64,
        description: &str,
    ) -> LibraryResult<Movie> {
        self.store.reload()?;
        self.check_unique(title)?;

        let movie = Movie::new(title, movie_length, description)?;
        self.store.insert(movie.clone())?;
        info!("Added '{}'", movie.title());
        Ok(movie)
    }

    /// Adds a movie that was built elsewhere (e.g. received over HTTP)
    ///
    /// The record is re-validated and always starts out available.
    pub fn add_existing(&mut self, mut movie: Movie) -> LibraryResult<Movie> {
        if let Err(mut errors) = movie.validate() {
            return Err(LibraryError::Validation(errors.remove(0)));
        }
        movie.set_lent(false);

        self.store.reload()?;
        self.check_unique(movie.title())?;

        self.store.insert(movie.clone())?;
        info!("Added '{}'", movie.title());
        Ok(movie)
    }

    /// Removes a movie, refusing to empty the catalog
    pub fn delete_movie(&mut self, title: &str) -> LibraryResult<Movie> {
        self.store.reload()?;
        if self.store.find_by_title(title).is_none() {
            return Err(not_found(title));
        }
        if self.store.len() == 1 {
            return Err(LibraryError::MinimumCatalogSize);
        }

        let removed = self.store.remove(title)?;
        info!("Deleted '{}'", removed.title());
        Ok(removed)
    }

    pub fn stats(&mut self) -> LibraryResult<CatalogStats> {
        self.store.reload()?;
        Ok(CatalogStats::from_movies(self.store.movies()))
    }

    fn check_unique(&self, title: &str) -> LibraryResult<()> {
        match self.store.find_by_title(title) {
            Some(existing) => Err(LibraryError::DuplicateTitle {
                title: existing.title().to_string(),
            }),
            None => Ok(()),
        }
    }

    /// Title as stored in the catalog, falling back to the query
    fn display_title(&self, title: &str) -> String {
        self.store
            .find_by_title(title)
            .map(|movie| movie.title().to_string())
            .unwrap_or_else(|| title.trim().to_string())
    }
}

fn not_found(title: &str) -> LibraryError {
    LibraryError::NotFound {
        title: title.trim().to_string(),
    }
}

/// Catalog summary
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct CatalogStats {
    pub total: usize,
    pub lent: usize,
    pub available: usize,
    pub total_minutes: f64,
}

impl CatalogStats {
    pub fn from_movies(movies: &[Movie]) -> Self {
        let lent = movies.iter().filter(|m| m.is_lent()).count();
        Self {
            total: movies.len(),
            lent,
            available: movies.len() - lent,
            total_minutes: movies.iter().map(Movie::movie_length).sum(),
        }
    }
}
