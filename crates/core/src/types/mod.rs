//! Domain types for MovieLibrary
//!
//! - `movie`: the `Movie` entity and its field rules
//! - `common`: shared traits and title normalization

mod common;
mod movie;

pub use common::{normalize_title, Validator};
pub use movie::{Movie, MAX_DESCRIPTION_CHARS, MAX_MOVIE_LENGTH, MIN_DESCRIPTION_CHARS};
