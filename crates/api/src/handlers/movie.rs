//! Handlers for the `/movie` resource.
//!
//! Add and update take a multipart form with a `movieDto` part (JSON
//! metadata) and a `file` part (the poster). Everything else is plain JSON.

use axum::extract::{Multipart, Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use movieflix_core::catalog::PosterUpload;
use movieflix_core::movie::{MovieDetails, MovieDto};
use movieflix_core::paging::Page;
use movieflix_core::types::DbId;

use crate::error::{AppError, AppResult};
use crate::query::{PageParams, SortedPageParams};
use crate::state::AppState;

/// Multipart part carrying the poster bytes.
const FILE_PART: &str = "file";

/// Multipart part carrying the movie metadata as JSON text.
const DETAILS_PART: &str = "movieDto";

/// The parts of an add/update form, as received.
struct MovieForm {
    details: Option<String>,
    file: Option<PosterUpload>,
}

impl MovieForm {
    async fn read(mut multipart: Multipart) -> AppResult<Self> {
        let mut form = MovieForm {
            details: None,
            file: None,
        };

        while let Some(field) = multipart
            .next_field()
            .await
            .map_err(|e| AppError::BadRequest(e.to_string()))?
        {
            let name = field.name().unwrap_or("").to_string();
            match name.as_str() {
                FILE_PART => {
                    let file_name = field.file_name().unwrap_or("").to_string();
                    let data = field
                        .bytes()
                        .await
                        .map_err(|e| AppError::BadRequest(e.to_string()))?;
                    form.file = Some(PosterUpload::new(file_name, data.to_vec()));
                }
                DETAILS_PART => {
                    let text = field
                        .text()
                        .await
                        .map_err(|e| AppError::BadRequest(e.to_string()))?;
                    form.details = Some(text);
                }
                _ => {} // ignore unknown parts
            }
        }

        Ok(form)
    }

    fn details(&self) -> AppResult<MovieDetails> {
        let raw = self.details.as_deref().ok_or_else(|| {
            AppError::BadRequest(format!("Missing required '{DETAILS_PART}' part"))
        })?;
        serde_json::from_str(raw)
            .map_err(|e| AppError::BadRequest(format!("Invalid '{DETAILS_PART}' JSON: {e}")))
    }
}

/// POST /api/v1/movie/add-movie
pub async fn add_movie(
    State(state): State<AppState>,
    multipart: Multipart,
) -> AppResult<(StatusCode, Json<MovieDto>)> {
    let form = MovieForm::read(multipart).await?;
    let details = form.details()?;
    let upload = form
        .file
        .ok_or_else(|| AppError::BadRequest(format!("Missing required '{FILE_PART}' part")))?;

    let movie = state.catalog.add_movie(details, upload).await?;
    Ok((StatusCode::CREATED, Json(movie)))
}

/// GET /api/v1/movie/{id}
pub async fn get_movie(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<MovieDto>> {
    let movie = state.catalog.get_movie(id).await?;
    Ok(Json(movie))
}

/// GET /api/v1/movie/all
pub async fn get_all_movies(State(state): State<AppState>) -> AppResult<Json<Vec<MovieDto>>> {
    let movies = state.catalog.get_all_movies().await?;
    Ok(Json(movies))
}

/// PUT /api/v1/movie/update/{id}
///
/// The `file` part is optional; when it is absent or empty the current
/// poster is kept.
pub async fn update_movie(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    multipart: Multipart,
) -> AppResult<Json<MovieDto>> {
    let form = MovieForm::read(multipart).await?;
    let details = form.details()?;
    let upload = form.file.filter(|f| !f.bytes.is_empty());

    let movie = state.catalog.update_movie(id, details, upload).await?;
    Ok(Json(movie))
}

/// DELETE /api/v1/movie/delete/{id}
pub async fn delete_movie(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<String> {
    let message = state.catalog.delete_movie(id).await?;
    Ok(message)
}

/// GET /api/v1/movie/allMoviesPage?pageNumber=&pageSize=
pub async fn get_movies_page(
    State(state): State<AppState>,
    Query(params): Query<PageParams>,
) -> AppResult<Json<Page<MovieDto>>> {
    let request = params.to_request()?;
    let page = state.catalog.get_page(request).await?;
    Ok(Json(page))
}

/// GET /api/v1/movie/allMoviesPageSort?pageNumber=&pageSize=&sortBy=&dir=
pub async fn get_movies_page_sorted(
    State(state): State<AppState>,
    Query(params): Query<SortedPageParams>,
) -> AppResult<Json<Page<MovieDto>>> {
    let request = params.to_request()?;
    let sort = params.to_sort()?;
    let page = state.catalog.get_page_sorted(request, sort).await?;
    Ok(Json(page))
}
