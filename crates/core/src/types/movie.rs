//! Movie domain model
//!
//! A `Movie` can only exist in a valid state: the constructor and every
//! field setter run the same rules, and deserialization goes through the
//! constructor as well, so a record read from disk or the network is checked
//! before it becomes a `Movie`.

use crate::error::{MovieField, ValidationError, ValidationResult};
use crate::types::{normalize_title, Validator};
use serde::{Deserialize, Serialize};

/// Longest accepted movie, in minutes
pub const MAX_MOVIE_LENGTH: f64 = 120.0;

/// Shortest accepted description, in characters
pub const MIN_DESCRIPTION_CHARS: usize = 20;

/// Longest accepted description, in characters
pub const MAX_DESCRIPTION_CHARS: usize = 250;

/// A single catalog item
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", try_from = "MovieRecord")]
pub struct Movie {
    title: String,
    movie_length: f64,
    description: String,
    is_lent: bool,
}

/// Wire shape of a movie before validation
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct MovieRecord {
    title: String,
    movie_length: f64,
    description: String,
    #[serde(default)]
    is_lent: bool,
}

impl TryFrom<MovieRecord> for Movie {
    type Error = ValidationError;

    fn try_from(record: MovieRecord) -> Result<Self, Self::Error> {
        let mut movie = Movie::new(record.title, record.movie_length, record.description)?;
        movie.is_lent = record.is_lent;
        Ok(movie)
    }
}

impl Movie {
    /// Creates a new, available movie after validating every field
    pub fn new(
        title: impl Into<String>,
        movie_length: f64,
        description: impl Into<String>,
    ) -> ValidationResult<Self> {
        let title = title.into();
        let description = description.into();

        check_title(&title)?;
        check_movie_length(movie_length)?;
        check_description(&description)?;

        Ok(Self {
            title,
            movie_length,
            description,
            is_lent: false,
        })
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    /// Length in minutes
    pub fn movie_length(&self) -> f64 {
        self.movie_length
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn is_lent(&self) -> bool {
        self.is_lent
    }

    pub fn is_available(&self) -> bool {
        !self.is_lent
    }

    /// Returns the catalog key for this movie
    pub fn normalized_title(&self) -> String {
        normalize_title(&self.title)
    }

    /// Returns true if `query` names this movie, ignoring case and
    /// surrounding whitespace
    pub fn matches_title(&self, query: &str) -> bool {
        self.normalized_title() == normalize_title(query)
    }

    /// Replaces the title; the old title is kept if the new one is invalid
    pub fn set_title(&mut self, title: impl Into<String>) -> ValidationResult<()> {
        let title = title.into();
        check_title(&title)?;
        self.title = title;
        Ok(())
    }

    /// Replaces the length; the old length is kept if the new one is invalid
    pub fn set_movie_length(&mut self, movie_length: f64) -> ValidationResult<()> {
        check_movie_length(movie_length)?;
        self.movie_length = movie_length;
        Ok(())
    }

    /// Replaces the description; the old description is kept if the new one
    /// is invalid
    pub fn set_description(&mut self, description: impl Into<String>) -> ValidationResult<()> {
        let description = description.into();
        check_description(&description)?;
        self.description = description;
        Ok(())
    }

    /// Sets the lending flag.
    ///
    /// Whether a transition is allowed (no lending twice, no returning an
    /// available movie) is decided by the catalog manager.
    pub fn set_lent(&mut self, is_lent: bool) {
        self.is_lent = is_lent;
    }
}

impl Validator for Movie {
    fn validate(&self) -> Result<(), Vec<ValidationError>> {
        let errors: Vec<ValidationError> = [
            check_title(&self.title),
            check_movie_length(self.movie_length),
            check_description(&self.description),
        ]
        .into_iter()
        .filter_map(|r| r.err())
        .collect();

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}

fn check_title(title: &str) -> ValidationResult<()> {
    if title.trim().is_empty() {
        return Err(ValidationError::new(MovieField::Title, "must not be empty"));
    }
    Ok(())
}

fn check_movie_length(minutes: f64) -> ValidationResult<()> {
    if !minutes.is_finite() || minutes <= 0.0 {
        return Err(
            ValidationError::new(MovieField::MovieLength, "must be greater than 0 minutes")
                .rejecting(minutes),
        );
    }
    if minutes > MAX_MOVIE_LENGTH {
        return Err(ValidationError::new(
            MovieField::MovieLength,
            format!("must not exceed {} minutes", MAX_MOVIE_LENGTH),
        )
        .rejecting(minutes));
    }
    Ok(())
}

fn check_description(description: &str) -> ValidationResult<()> {
    let chars = description.chars().count();
    if !(MIN_DESCRIPTION_CHARS..=MAX_DESCRIPTION_CHARS).contains(&chars) {
        return Err(ValidationError::new(
            MovieField::Description,
            format!(
                "must be between {} and {} characters",
                MIN_DESCRIPTION_CHARS, MAX_DESCRIPTION_CHARS
            ),
        )
        .rejecting(format_args!("{} characters", chars)));
    }
    Ok(())
}
