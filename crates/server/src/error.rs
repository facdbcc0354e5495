//! API error type and the `{code, message}` error payload

use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use movielibrary_library::LibraryError;
use serde::{Deserialize, Serialize};

/// Body of every non-2xx response
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ErrorResponse {
    /// Stable machine-readable code, e.g. `ALREADY_LENT`
    pub code: String,
    /// Human readable message
    pub message: String,
}

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error(transparent)]
    Library(#[from] LibraryError),

    /// Request body could not be turned into a movie
    #[error("{0}")]
    InvalidBody(String),

    #[error("catalog lock poisoned")]
    LockPoisoned,

    /// The blocking catalog task panicked or was cancelled
    #[error("catalog task failed: {0}")]
    Task(#[from] tokio::task::JoinError),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::Library(e) => match e {
                LibraryError::NotFound { .. } => StatusCode::NOT_FOUND,
                LibraryError::DuplicateTitle { .. } => StatusCode::CONFLICT,
                LibraryError::Validation(_)
                | LibraryError::AlreadyLent { .. }
                | LibraryError::NotLent { .. }
                | LibraryError::MinimumCatalogSize => StatusCode::BAD_REQUEST,
                _ => StatusCode::INTERNAL_SERVER_ERROR,
            },
            ApiError::InvalidBody(_) => StatusCode::BAD_REQUEST,
            ApiError::LockPoisoned | ApiError::Task(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn code(&self) -> &'static str {
        match self {
            ApiError::Library(e) => match e {
                LibraryError::Validation(_) => "VALIDATION_FAILED",
                LibraryError::DuplicateTitle { .. } => "DUPLICATE_TITLE",
                LibraryError::NotFound { .. } => "NOT_FOUND",
                LibraryError::AlreadyLent { .. } => "ALREADY_LENT",
                LibraryError::NotLent { .. } => "NOT_LENT",
                LibraryError::MinimumCatalogSize => "MINIMUM_CATALOG_SIZE",
                _ => "STORAGE_ERROR",
            },
            ApiError::InvalidBody(_) => "INVALID_BODY",
            ApiError::LockPoisoned | ApiError::Task(_) => "INTERNAL",
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::InvalidBody(rejection.body_text())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            log::error!("Request failed: {}", self);
        } else {
            log::warn!("Request rejected: {}", self);
        }

        // Storage details stay in the log
        let message = match self {
            ApiError::Library(ref e) if !e.is_client_error() => e.user_message(),
            ref other => other.to_string(),
        };

        let body = ErrorResponse {
            code: self.code().to_string(),
            message,
        };
        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_status_mapping() {
        let cases = [
            (
                LibraryError::NotFound {
                    title: "Jaws".into(),
                },
                StatusCode::NOT_FOUND,
            ),
            (
                LibraryError::DuplicateTitle {
                    title: "Jaws".into(),
                },
                StatusCode::CONFLICT,
            ),
            (LibraryError::MinimumCatalogSize, StatusCode::BAD_REQUEST),
            (
                LibraryError::ParseError {
                    path: PathBuf::from("movies.json"),
                    reason: "catalog file is empty".into(),
                },
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
        ];

        for (error, expected) in cases {
            assert_eq!(ApiError::from(error).status(), expected);
        }
    }

    #[test]
    fn test_storage_errors_hide_details() {
        let error = ApiError::from(LibraryError::ParseError {
            path: PathBuf::from("/srv/movies.json"),
            reason: "expected value at line 1 column 1".into(),
        });
        assert_eq!(error.code(), "STORAGE_ERROR");

        let response = error.into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
