//! [`MovieStore`] adapter over [`MovieRepo`].

use async_trait::async_trait;
use movieflix_core::movie::{Movie, NewMovie};
use movieflix_core::paging::{PageRequest, Sort};
use movieflix_core::store::{MovieSlice, MovieStore, StoreError};
use movieflix_core::types::DbId;

use crate::repositories::MovieRepo;
use crate::DbPool;

/// PostgreSQL-backed record store.
#[derive(Debug, Clone)]
pub struct PgMovieStore {
    pool: DbPool,
}

impl PgMovieStore {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl MovieStore for PgMovieStore {
    async fn health_check(&self) -> Result<(), StoreError> {
        crate::health_check(&self.pool)
            .await
            .map_err(|e| StoreError::Unavailable(e.to_string()))
    }

    async fn find_by_id(&self, id: DbId) -> Result<Option<Movie>, StoreError> {
        let row = MovieRepo::find_by_id(&self.pool, id)
            .await
            .map_err(classify)?;
        Ok(row.map(Movie::from))
    }

    async fn find_all(&self) -> Result<Vec<Movie>, StoreError> {
        let rows = MovieRepo::list_all(&self.pool).await.map_err(classify)?;
        Ok(rows.into_iter().map(Movie::from).collect())
    }

    async fn find_page(
        &self,
        request: PageRequest,
        sort: Option<Sort>,
    ) -> Result<MovieSlice, StoreError> {
        let (rows, total) =
            MovieRepo::list_page(&self.pool, sort, request.page_size(), request.offset())
                .await
                .map_err(classify)?;
        Ok(MovieSlice {
            movies: rows.into_iter().map(Movie::from).collect(),
            total,
        })
    }

    async fn insert(&self, movie: &NewMovie) -> Result<Movie, StoreError> {
        let row = MovieRepo::create(&self.pool, movie).await.map_err(classify)?;
        Ok(row.into())
    }

    async fn update(&self, movie: &Movie) -> Result<Option<Movie>, StoreError> {
        let row = MovieRepo::update(&self.pool, movie)
            .await
            .map_err(classify)?;
        Ok(row.map(Movie::from))
    }

    async fn delete(&self, id: DbId) -> Result<bool, StoreError> {
        MovieRepo::delete(&self.pool, id).await.map_err(classify)
    }
}

/// Map a sqlx error onto the store's error type.
///
/// Unique constraint violations (PostgreSQL code 23505 on a `uq_` constraint)
/// become [`StoreError::Duplicate`]; everything else is logged and reported
/// as a database error.
fn classify(err: sqlx::Error) -> StoreError {
    if let sqlx::Error::Database(db_err) = &err {
        if db_err.code().as_deref() == Some("23505") {
            let constraint = db_err.constraint().unwrap_or("unknown");
            if constraint.starts_with("uq_") {
                return StoreError::Duplicate(format!(
                    "Duplicate value violates unique constraint: {constraint}"
                ));
            }
        }
    }
    tracing::error!(error = %err, "Database error");
    StoreError::Database(err.to_string())
}
