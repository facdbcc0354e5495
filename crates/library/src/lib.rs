//! MovieLibrary catalog management
//!
//! Keeps the movie catalog in a JSON file and enforces the lending rules on
//! top of it. [`CatalogStore`] mirrors the file in memory; [`LibraryManager`]
//! is the API the CLI and the REST server talk to.

pub mod bootstrap;
pub mod error;
pub mod manager;
pub mod store;

pub use bootstrap::{ensure_catalog, DEFAULT_CATALOG};
pub use error::{LibraryError, LibraryResult};
pub use manager::{CatalogStats, LibraryManager};
pub use store::CatalogStore;
