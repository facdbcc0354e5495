use std::fmt;
use std::io;
use std::path::PathBuf;
use thiserror::Error;

pub type ConfigResult<T> = Result<T, ConfigError>;

/// Failure to locate, read or write `config.toml`
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Could not determine the configuration directory for this user")]
    NoConfigDirectory,

    #[error("Could not determine the home directory for this user")]
    NoHomeDirectory,

    #[error("Cannot read {path}: {source}")]
    Read { path: PathBuf, source: io::Error },

    /// The file exists but holds nothing; an empty file is never taken as defaults
    #[error("{path} is empty")]
    Empty { path: PathBuf },

    #[error("Cannot parse {path}: {source}")]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },

    #[error("Cannot encode configuration: {0}")]
    Encode(#[from] toml::ser::Error),

    #[error("Cannot write {path}: {source}")]
    Write { path: PathBuf, source: io::Error },

    #[error("Invalid configuration: {}", join(.0))]
    Invalid(Vec<ConfigProblem>),
}

fn join(problems: &[ConfigProblem]) -> String {
    problems
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

/// A setting that cannot be used, e.g. `server.port: must not be 0`
///
/// `field` is either a `table.key` path in `config.toml` or the name of the
/// environment variable that carried the value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigProblem {
    pub field: String,
    pub message: String,
}

impl ConfigProblem {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }

    /// Problem with the key `key` of the table `section`
    pub(crate) fn in_section(section: &str, key: &str, message: impl Into<String>) -> Self {
        Self::new(format!("{section}.{key}"), message)
    }
}

impl fmt::Display for ConfigProblem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_lists_every_problem() {
        let err = ConfigError::Invalid(vec![
            ConfigProblem::in_section("server", "host", "must not be blank"),
            ConfigProblem::in_section("server", "port", "must not be 0"),
        ]);
        assert_eq!(
            err.to_string(),
            "Invalid configuration: server.host: must not be blank; server.port: must not be 0"
        );
    }
}
