//! Route definitions for the `/movie` resource.

use axum::routing::{delete, get, post, put};
use axum::Router;

use crate::handlers::movie;
use crate::state::AppState;

/// Routes mounted at `/movie`.
///
/// ```text
/// POST   /add-movie           -> add_movie (multipart)
/// GET    /all                 -> get_all_movies
/// GET    /allMoviesPage       -> get_movies_page (?pageNumber, pageSize)
/// GET    /allMoviesPageSort   -> get_movies_page_sorted (?pageNumber, pageSize, sortBy, dir)
/// PUT    /update/{id}         -> update_movie (multipart)
/// DELETE /delete/{id}         -> delete_movie
/// GET    /{id}                -> get_movie
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/add-movie", post(movie::add_movie))
        .route("/all", get(movie::get_all_movies))
        .route("/allMoviesPage", get(movie::get_movies_page))
        .route("/allMoviesPageSort", get(movie::get_movies_page_sorted))
        .route("/update/{id}", put(movie::update_movie))
        .route("/delete/{id}", delete(movie::delete_movie))
        .route("/{id}", get(movie::get_movie))
}
