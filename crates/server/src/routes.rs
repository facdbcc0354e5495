//! `/movielibrary` endpoints

use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::routing::{get, post};
use axum::{Json, Router};
use movielibrary_core::Movie;

use crate::error::ApiError;
use crate::AppState;

/// Catalog route group.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/movielibrary/movies", get(list_movies).put(add_movie))
        .route(
            "/movielibrary/movies/:title",
            get(get_movie).delete(delete_movie),
        )
        .route("/movielibrary/movies/:title/lentstatus", get(lent_status))
        .route("/movielibrary/movies/:title/lend", post(lend_movie))
        .route("/movielibrary/movies/:title/return", post(return_movie))
}

/// `GET /movielibrary/movies`
pub async fn list_movies(State(state): State<AppState>) -> Result<Json<Vec<Movie>>, ApiError> {
    let movies = state.with_manager(|manager| manager.list_movies()).await?;
    Ok(Json(movies))
}

/// `GET /movielibrary/movies/{title}`
pub async fn get_movie(
    State(state): State<AppState>,
    Path(title): Path<String>,
) -> Result<Json<Movie>, ApiError> {
    let movie = state
        .with_manager(move |manager| manager.get_movie(&title))
        .await?;
    Ok(Json(movie))
}

/// `GET /movielibrary/movies/{title}/lentstatus`
pub async fn lent_status(
    State(state): State<AppState>,
    Path(title): Path<String>,
) -> Result<Json<bool>, ApiError> {
    let lent = state
        .with_manager(move |manager| manager.lent_status(&title))
        .await?;
    Ok(Json(lent))
}

/// `POST /movielibrary/movies/{title}/lend`
pub async fn lend_movie(
    State(state): State<AppState>,
    Path(title): Path<String>,
) -> Result<StatusCode, ApiError> {
    state
        .with_manager(move |manager| manager.lend(&title))
        .await?;
    Ok(StatusCode::OK)
}

/// `POST /movielibrary/movies/{title}/return`
pub async fn return_movie(
    State(state): State<AppState>,
    Path(title): Path<String>,
) -> Result<StatusCode, ApiError> {
    state
        .with_manager(move |manager| manager.return_movie(&title))
        .await?;
    Ok(StatusCode::OK)
}

/// `PUT /movielibrary/movies`
///
/// The body is a movie record; its `isLent` flag is ignored.
pub async fn add_movie(
    State(state): State<AppState>,
    payload: Result<Json<Movie>, JsonRejection>,
) -> Result<(StatusCode, Json<Movie>), ApiError> {
    let Json(movie) = payload?;
    let added = state
        .with_manager(move |manager| manager.add_existing(movie))
        .await?;
    Ok((StatusCode::CREATED, Json(added)))
}

/// `DELETE /movielibrary/movies/{title}`
pub async fn delete_movie(
    State(state): State<AppState>,
    Path(title): Path<String>,
) -> Result<StatusCode, ApiError> {
    state
        .with_manager(move |manager| manager.delete_movie(&title))
        .await?;
    Ok(StatusCode::NO_CONTENT)
}
