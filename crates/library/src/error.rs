use movielibrary_core::ValidationError;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum LibraryError {
    #[error("Invalid movie: {0}")]
    Validation(#[from] ValidationError),

    #[error("A movie titled '{title}' already exists")]
    DuplicateTitle { title: String },

    #[error("Movie not found: {title}")]
    NotFound { title: String },

    #[error("'{title}' is already lent")]
    AlreadyLent { title: String },

    #[error("'{title}' is not lent")]
    NotLent { title: String },

    #[error("The catalog must contain at least one movie")]
    MinimumCatalogSize,

    #[error("Failed to read catalog from {path}: {source}")]
    ReadError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to write catalog to {path}: {source}")]
    WriteError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse catalog {path}: {reason}")]
    ParseError { path: PathBuf, reason: String },

    #[error("Failed to serialize catalog: {0}")]
    SerializeError(#[from] serde_json::Error),

    #[error("Failed to create directory {path}: {source}")]
    DirectoryCreationError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl LibraryError {
    /// True when the request itself was wrong (bad input or an illegal
    /// lend/return/delete), false for storage faults
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            LibraryError::Validation(_)
                | LibraryError::DuplicateTitle { .. }
                | LibraryError::NotFound { .. }
                | LibraryError::AlreadyLent { .. }
                | LibraryError::NotLent { .. }
                | LibraryError::MinimumCatalogSize
        )
    }

    /// Short message suitable for showing to an end user
    pub fn user_message(&self) -> String {
        match self {
            LibraryError::Validation(e) => format!("{}: {}", e.field, e.message),
            LibraryError::DuplicateTitle { title } => {
                format!("The catalog already contains '{}'", title)
            }
            LibraryError::NotFound { title } => format!("No movie titled '{}'", title),
            LibraryError::AlreadyLent { title } => {
                format!("'{}' is already lent out", title)
            }
            LibraryError::NotLent { title } => format!("'{}' is not lent out", title),
            LibraryError::MinimumCatalogSize => {
                "The last movie in the catalog cannot be deleted".to_string()
            }
            LibraryError::ReadError { path, .. } | LibraryError::ParseError { path, .. } => {
                format!("The catalog at {} could not be loaded", path.display())
            }
            LibraryError::WriteError { path, .. }
            | LibraryError::DirectoryCreationError { path, .. } => {
                format!("The catalog at {} could not be saved", path.display())
            }
            LibraryError::SerializeError(_) => "The catalog could not be saved".to_string(),
        }
    }
}

pub type LibraryResult<T> = std::result::Result<T, LibraryError>;
