//! Rule violations on movie fields
//!
//! A [`ValidationError`] says which field of a movie broke which rule and,
//! for numeric and length rules, what was rejected. Its `Display` form is
//! meant to be shown to a user unchanged:
//!
//! ```text
//! Field 'movieLength': must be greater than 0 minutes (got: 0)
//! ```

use std::fmt;

pub type ValidationResult<T> = Result<T, ValidationError>;

/// Field of a movie record, named as in the catalog JSON
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MovieField {
    Title,
    MovieLength,
    Description,
}

impl MovieField {
    pub fn json_name(&self) -> &'static str {
        match self {
            MovieField::Title => "title",
            MovieField::MovieLength => "movieLength",
            MovieField::Description => "description",
        }
    }
}

impl fmt::Display for MovieField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.json_name())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    pub field: MovieField,
    /// The broken rule, phrased to follow the field name
    pub message: String,
    /// What was rejected, already formatted for display
    pub value: Option<String>,
}

impl ValidationError {
    pub fn new(field: MovieField, message: impl Into<String>) -> Self {
        Self {
            field,
            message: message.into(),
            value: None,
        }
    }

    /// Records the rejected value, shown as `(got: ...)`
    pub fn rejecting(mut self, value: impl fmt::Display) -> Self {
        self.value = Some(value.to_string());
        self
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Field '{}': {}", self.field, self.message)?;
        match self.value {
            Some(ref value) => write!(f, " (got: {})", value),
            None => Ok(()),
        }
    }
}

impl std::error::Error for ValidationError {}
