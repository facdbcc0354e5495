//! Bundled default catalog, written on first run

use crate::error::LibraryResult;
use crate::store::write_atomic;
use log::info;
use std::path::Path;

/// Catalog written when no catalog file exists yet
pub const DEFAULT_CATALOG: &str = r#"[
  {
    "title": "The Trollgirl",
    "movieLength": 100.0,
    "description": "When a girl is kidnapped by a troll, and turned into a troll. She meets the love of her life.",
    "isLent": false
  },
  {
    "title": "Loverboy",
    "movieLength": 97.0,
    "description": "Based on a true story, about a boy who marries his crush twice over.",
    "isLent": false
  }
]"#;

/// Writes [`DEFAULT_CATALOG`] to `path` unless a file is already there
///
/// Returns `true` when the default catalog was written.
pub fn ensure_catalog(path: &Path) -> LibraryResult<bool> {
    if path.exists() {
        return Ok(false);
    }

    write_atomic(path, DEFAULT_CATALOG)?;
    info!("Wrote default catalog to {}", path.display());
    Ok(true)
}
