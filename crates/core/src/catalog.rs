//! Catalog orchestration: movie records plus their poster files.
//!
//! Records and posters live in two independent resources with no shared
//! transaction. Every mutation is ordered so that a failure part-way through
//! never leaves a record pointing at a missing poster; where a step after a
//! poster write fails, the freshly written poster is removed again.

use std::path::PathBuf;
use std::sync::Arc;

use validator::Validate;

use crate::error::CoreError;
use crate::movie::{Movie, MovieDetails, MovieDto};
use crate::paging::{Page, PageRequest, Sort};
use crate::poster::{self, PosterStore};
use crate::store::MovieStore;
use crate::types::DbId;

const ENTITY: &str = "Movie";

/// Settings fixed at startup and shared by every catalog operation.
#[derive(Debug, Clone)]
pub struct CatalogConfig {
    /// Directory holding poster files.
    pub poster_dir: PathBuf,
    /// Public base URL that poster URLs are derived from.
    pub base_url: String,
}

/// An uploaded poster: the requested filename and its contents.
#[derive(Debug, Clone)]
pub struct PosterUpload {
    pub file_name: String,
    pub bytes: Vec<u8>,
}

impl PosterUpload {
    pub fn new(file_name: impl Into<String>, bytes: impl Into<Vec<u8>>) -> Self {
        Self {
            file_name: file_name.into(),
            bytes: bytes.into(),
        }
    }
}

pub struct CatalogService {
    store: Arc<dyn MovieStore>,
    posters: PosterStore,
    base_url: String,
}

impl CatalogService {
    pub fn new(store: Arc<dyn MovieStore>, config: &CatalogConfig) -> Self {
        Self {
            store,
            posters: PosterStore::new(config.poster_dir.clone()),
            base_url: config.base_url.clone(),
        }
    }

    pub fn posters(&self) -> &PosterStore {
        &self.posters
    }

    /// `true` if the record store answers its liveness probe.
    pub async fn store_healthy(&self) -> bool {
        match self.store.health_check().await {
            Ok(()) => true,
            Err(e) => {
                tracing::warn!(error = %e, "Record store health check failed");
                false
            }
        }
    }

    /// Store the poster, then insert a record referencing it.
    pub async fn add_movie(
        &self,
        details: MovieDetails,
        upload: PosterUpload,
    ) -> Result<MovieDto, CoreError> {
        details.validate()?;
        if upload.bytes.is_empty() {
            return Err(empty_file());
        }
        if self.posters.exists(&upload.file_name).await? {
            return Err(poster::duplicate(&upload.file_name));
        }

        let stored_name = self
            .posters
            .store(&upload.file_name, &upload.bytes)
            .await?;

        let movie = match self
            .store
            .insert(&details.into_new_movie(stored_name.clone()))
            .await
        {
            Ok(movie) => movie,
            Err(e) => {
                self.discard_poster(&stored_name).await;
                return Err(e.into());
            }
        };

        tracing::info!(movie_id = movie.movie_id, poster = %movie.poster, "Movie added");
        Ok(self.to_dto(movie))
    }

    pub async fn get_movie(&self, id: DbId) -> Result<MovieDto, CoreError> {
        let movie = self
            .store
            .find_by_id(id)
            .await?
            .ok_or(CoreError::NotFound { entity: ENTITY, id })?;
        Ok(self.to_dto(movie))
    }

    pub async fn get_all_movies(&self) -> Result<Vec<MovieDto>, CoreError> {
        let movies = self.store.find_all().await?;
        Ok(movies.into_iter().map(|m| self.to_dto(m)).collect())
    }

    /// Replace every metadata field of `id`. With an upload the poster is
    /// swapped for the new file; without one the current poster is kept.
    pub async fn update_movie(
        &self,
        id: DbId,
        details: MovieDetails,
        upload: Option<PosterUpload>,
    ) -> Result<MovieDto, CoreError> {
        details.validate()?;
        let existing = self
            .store
            .find_by_id(id)
            .await?
            .ok_or(CoreError::NotFound { entity: ENTITY, id })?;
        let old_poster = existing.poster;

        let upload = upload.filter(|u| !u.bytes.is_empty());
        let Some(upload) = upload else {
            let movie = details.into_movie(id, old_poster);
            let updated = self
                .store
                .update(&movie)
                .await?
                .ok_or(CoreError::NotFound { entity: ENTITY, id })?;
            tracing::info!(movie_id = id, "Movie updated");
            return Ok(self.to_dto(updated));
        };

        // Same name: the new content has to take the old file's place.
        if upload.file_name == old_poster {
            self.posters.delete(&old_poster).await?;
            let stored_name = self
                .posters
                .store(&upload.file_name, &upload.bytes)
                .await?;
            let updated = self
                .store
                .update(&details.into_movie(id, stored_name))
                .await?
                .ok_or(CoreError::NotFound { entity: ENTITY, id })?;
            tracing::info!(movie_id = id, poster = %updated.poster, "Movie updated, poster rewritten");
            return Ok(self.to_dto(updated));
        }

        let stored_name = self
            .posters
            .store(&upload.file_name, &upload.bytes)
            .await?;

        let updated = match self
            .store
            .update(&details.into_movie(id, stored_name.clone()))
            .await
        {
            Ok(Some(updated)) => updated,
            Ok(None) => {
                self.discard_poster(&stored_name).await;
                return Err(CoreError::NotFound { entity: ENTITY, id });
            }
            Err(e) => {
                self.discard_poster(&stored_name).await;
                return Err(e.into());
            }
        };

        if let Err(e) = self.posters.delete(&old_poster).await {
            // The record already points at the new poster; the old file is
            // only an orphan now.
            tracing::warn!(movie_id = id, poster = %old_poster, error = %e, "Failed to delete replaced poster");
        }

        tracing::info!(movie_id = id, poster = %updated.poster, replaced = %old_poster, "Movie updated, poster replaced");
        Ok(self.to_dto(updated))
    }

    /// Delete the poster, then the record.
    pub async fn delete_movie(&self, id: DbId) -> Result<String, CoreError> {
        let movie = self
            .store
            .find_by_id(id)
            .await?
            .ok_or(CoreError::NotFound { entity: ENTITY, id })?;

        self.posters.delete(&movie.poster).await?;
        if !self.store.delete(id).await? {
            return Err(CoreError::NotFound { entity: ENTITY, id });
        }

        tracing::info!(movie_id = id, poster = %movie.poster, "Movie deleted");
        Ok(format!("Movie deleted with id = {id}"))
    }

    /// A page of movies in primary-key order.
    pub async fn get_page(&self, request: PageRequest) -> Result<Page<MovieDto>, CoreError> {
        self.page(request, None).await
    }

    /// A page of movies ordered by `sort`.
    pub async fn get_page_sorted(
        &self,
        request: PageRequest,
        sort: Sort,
    ) -> Result<Page<MovieDto>, CoreError> {
        self.page(request, Some(sort)).await
    }

    async fn page(
        &self,
        request: PageRequest,
        sort: Option<Sort>,
    ) -> Result<Page<MovieDto>, CoreError> {
        let slice = self.store.find_page(request, sort).await?;
        Ok(Page::new(slice.movies, request, slice.total).map(|m| self.to_dto(m)))
    }

    fn to_dto(&self, movie: Movie) -> MovieDto {
        MovieDto::from_movie(movie, &self.base_url)
    }

    /// Best-effort removal of a poster written by a failed operation.
    async fn discard_poster(&self, file_name: &str) {
        if let Err(e) = self.posters.delete(file_name).await {
            tracing::error!(poster = %file_name, error = %e, "Failed to remove poster after record write failed");
        }
    }
}

fn empty_file() -> CoreError {
    CoreError::EmptyInput("File is empty! Please send another file!".into())
}
