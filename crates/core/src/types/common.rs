use crate::error::ValidationError;

/// Re-checks a value against every field rule at once
///
/// Constructors and setters stop at the first broken rule; `validate`
/// reports all of them, which is what callers want for records that arrive
/// from disk or over the wire.
pub trait Validator {
    fn validate(&self) -> Result<(), Vec<ValidationError>>;

    fn is_valid(&self) -> bool {
        self.validate().is_ok()
    }
}

/// Catalog key of a title: surrounding whitespace dropped, lowercased
///
/// Inner whitespace is significant, so "The  Trollgirl" and "The Trollgirl"
/// are different movies.
pub fn normalize_title(title: &str) -> String {
    title.trim().to_lowercase()
}
