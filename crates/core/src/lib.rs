//! MovieLibrary core domain
//!
//! The `Movie` entity and the field rules every catalog entry must satisfy.
//! Nothing in this crate touches the file system; persistence lives in
//! `movielibrary-library`.

pub mod error;
pub mod types;

// Re-export commonly used types
pub use error::{MovieField, ValidationError, ValidationResult};
pub use types::{
    normalize_title, Movie, Validator, MAX_DESCRIPTION_CHARS, MAX_MOVIE_LENGTH,
    MIN_DESCRIPTION_CHARS,
};
