//! MovieLibrary REST server
//!
//! Exposes the catalog operations of [`LibraryManager`] over HTTP under
//! `/movielibrary`. Requests are served one at a time against the catalog:
//! the manager sits behind a mutex that each handler holds for the whole
//! operation.

pub mod error;
pub mod routes;

use std::future::Future;
use std::sync::{Arc, Mutex};

use axum::extract::OriginalUri;
use axum::http::StatusCode;
use axum::routing::get;
use axum::{Json, Router};
use movielibrary_library::{LibraryManager, LibraryResult};
use serde_json::{json, Value};
use tokio::net::TcpListener;

pub use error::{ApiError, ErrorResponse};

/// Shared handler state
#[derive(Clone)]
pub struct AppState {
    manager: Arc<Mutex<LibraryManager>>,
}

impl AppState {
    pub fn new(manager: LibraryManager) -> Self {
        Self {
            manager: Arc::new(Mutex::new(manager)),
        }
    }

    /// Runs `op` with exclusive access to the manager
    ///
    /// Catalog operations do blocking file I/O, so they run on tokio's
    /// blocking pool.
    pub async fn with_manager<T, F>(&self, op: F) -> Result<T, ApiError>
    where
        F: FnOnce(&mut LibraryManager) -> LibraryResult<T> + Send + 'static,
        T: Send + 'static,
    {
        let shared = Arc::clone(&self.manager);
        tokio::task::spawn_blocking(move || -> Result<T, ApiError> {
            let mut manager = shared.lock().map_err(|_| ApiError::LockPoisoned)?;
            Ok(op(&mut *manager)?)
        })
        .await?
    }
}

/// Builds the full application router
pub fn router(state: AppState) -> Router {
    Router::new()
        .merge(routes::routes())
        .route("/health", get(health))
        .fallback(not_found)
        .with_state(state)
}

/// Serves the API on `listener` until `shutdown` resolves
pub async fn serve<F>(listener: TcpListener, state: AppState, shutdown: F) -> std::io::Result<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    axum::serve(listener, router(state))
        .with_graceful_shutdown(shutdown)
        .await
}

async fn health() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}

async fn not_found(uri: OriginalUri) -> (StatusCode, Json<ErrorResponse>) {
    (
        StatusCode::NOT_FOUND,
        Json(ErrorResponse {
            code: "NOT_FOUND".to_string(),
            message: format!("not found: {}", uri.0.path()),
        }),
    )
}
