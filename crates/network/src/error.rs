//! Error types for remote catalog access

use thiserror::Error;

/// Result type for remote catalog operations
pub type NetworkResult<T> = Result<T, NetworkError>;

/// Errors that can occur while talking to a catalog server
#[derive(Debug, Error)]
pub enum NetworkError {
    /// Transport failure, timeout, or an undecodable response body
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// Base URL cannot carry a path
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    /// Server answered 404
    #[error("Not found: {0}")]
    NotFound(String),

    /// Server answered 409
    #[error("Duplicate title: {0}")]
    DuplicateTitle(String),

    /// Any other 4xx, e.g. lending a movie that is already lent
    #[error("Rejected ({status}): {message}")]
    Rejected {
        status: u16,
        code: String,
        message: String,
    },

    /// 5xx
    #[error("Server error ({status}): {message}")]
    Server { status: u16, message: String },
}

impl NetworkError {
    /// Returns true if retrying the same request might succeed
    pub fn is_retryable(&self) -> bool {
        match self {
            NetworkError::Http(e) => e.is_timeout() || e.is_connect(),
            NetworkError::Server { .. } => true,
            _ => false,
        }
    }

    /// Returns true if the server refused the request itself (4xx)
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            NetworkError::NotFound(_)
                | NetworkError::DuplicateTitle(_)
                | NetworkError::Rejected { .. }
        )
    }

    /// Returns true if the error is a server error (5xx)
    pub fn is_server_error(&self) -> bool {
        matches!(self, NetworkError::Server { .. })
    }
}
