pub mod health;
pub mod movie;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /movie/add-movie                                 add (multipart)
/// /movie/all                                       list all
/// /movie/allMoviesPage                             paged list
/// /movie/allMoviesPageSort                         paged + sorted list
/// /movie/update/{id}                               update (multipart)
/// /movie/delete/{id}                               delete
/// /movie/{id}                                      get
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new().nest("/movie", movie::router())
}
