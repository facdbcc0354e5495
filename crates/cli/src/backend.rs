//! Where catalog commands are executed: a local file or a remote server

use anyhow::{anyhow, Result};
use movielibrary_core::Movie;
use movielibrary_library::{CatalogStats, LibraryError, LibraryManager};
use movielibrary_network::RemoteLibraryAccess;

pub enum Backend {
    Local(LibraryManager),
    Remote(RemoteLibraryAccess),
}

impl Backend {
    pub async fn movies(&mut self) -> Result<Vec<Movie>> {
        match self {
            Backend::Local(manager) => manager.list_movies().map_err(library_error),
            Backend::Remote(client) => Ok(client.movies().await?),
        }
    }

    pub async fn movie(&mut self, title: &str) -> Result<Movie> {
        match self {
            Backend::Local(manager) => manager.get_movie(title).map_err(library_error),
            Backend::Remote(client) => Ok(client.movie(title).await?),
        }
    }

    pub async fn lent_status(&mut self, title: &str) -> Result<bool> {
        match self {
            Backend::Local(manager) => manager.lent_status(title).map_err(library_error),
            Backend::Remote(client) => Ok(client.lent_status(title).await?),
        }
    }

    pub async fn lend(&mut self, title: &str) -> Result<()> {
        match self {
            Backend::Local(manager) => manager.lend(title).map_err(library_error),
            Backend::Remote(client) => Ok(client.lend(title).await?),
        }
    }

    pub async fn return_movie(&mut self, title: &str) -> Result<()> {
        match self {
            Backend::Local(manager) => manager.return_movie(title).map_err(library_error),
            Backend::Remote(client) => Ok(client.return_movie(title).await?),
        }
    }

    pub async fn add_movie(
        &mut self,
        title: &str,
        movie_length: f64,
        description: &str,
    ) -> Result<Movie> {
        match self {
            Backend::Local(manager) => manager
                .add_movie(title, movie_length, description)
                .map_err(library_error),
            Backend::Remote(client) => {
                let movie = Movie::new(title, movie_length, description)
                    .map_err(|e| library_error(e.into()))?;
                Ok(client.add_movie(&movie).await?)
            }
        }
    }

    pub async fn delete_movie(&mut self, title: &str) -> Result<()> {
        match self {
            Backend::Local(manager) => manager.delete_movie(title).map(drop).map_err(library_error),
            Backend::Remote(client) => Ok(client.delete_movie(title).await?),
        }
    }

    pub async fn stats(&mut self) -> Result<CatalogStats> {
        match self {
            Backend::Local(manager) => manager.stats().map_err(library_error),
            Backend::Remote(client) => Ok(CatalogStats::from_movies(&client.movies().await?)),
        }
    }

    /// Human readable location of the catalog
    pub fn describe(&self) -> String {
        match self {
            Backend::Local(manager) => manager.store().path().display().to_string(),
            Backend::Remote(client) => client.base_url().to_string(),
        }
    }
}

/// Rule violations read as plain messages; storage faults keep their cause
fn library_error(e: LibraryError) -> anyhow::Error {
    let message = e.user_message();
    if e.is_client_error() {
        anyhow!(message)
    } else {
        anyhow::Error::new(e).context(message)
    }
}
