//! In-process [`MovieStore`] backed by an ordered map.
//!
//! Ids are assigned from a monotonically increasing counter starting at 1 and
//! are never reused, matching a `BIGSERIAL` column.

use std::cmp::Ordering;
use std::collections::BTreeMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::movie::{Movie, NewMovie};
use crate::paging::{PageRequest, Sort, SortDirection, SortField};
use crate::store::{MovieSlice, MovieStore, StoreError};
use crate::types::DbId;

#[derive(Debug, Default)]
struct Inner {
    next_id: DbId,
    movies: BTreeMap<DbId, Movie>,
}

#[derive(Debug, Default)]
pub struct InMemoryMovieStore {
    inner: RwLock<Inner>,
}

impl InMemoryMovieStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn len(&self) -> usize {
        self.inner.read().await.movies.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}

#[async_trait]
impl MovieStore for InMemoryMovieStore {
    async fn health_check(&self) -> Result<(), StoreError> {
        Ok(())
    }

    async fn find_by_id(&self, id: DbId) -> Result<Option<Movie>, StoreError> {
        Ok(self.inner.read().await.movies.get(&id).cloned())
    }

    async fn find_all(&self) -> Result<Vec<Movie>, StoreError> {
        Ok(self.inner.read().await.movies.values().cloned().collect())
    }

    async fn find_page(
        &self,
        request: PageRequest,
        sort: Option<Sort>,
    ) -> Result<MovieSlice, StoreError> {
        let mut movies: Vec<Movie> = self.inner.read().await.movies.values().cloned().collect();
        if let Some(sort) = sort {
            movies.sort_by(|a, b| compare(a, b, sort));
        }

        let total = movies.len() as i64;
        let offset = usize::try_from(request.offset()).unwrap_or(usize::MAX);
        let limit = usize::try_from(request.page_size()).unwrap_or(usize::MAX);
        let movies = movies.into_iter().skip(offset).take(limit).collect();

        Ok(MovieSlice { movies, total })
    }

    async fn insert(&self, movie: &NewMovie) -> Result<Movie, StoreError> {
        let mut inner = self.inner.write().await;
        inner.next_id += 1;
        let stored = Movie {
            movie_id: inner.next_id,
            title: movie.title.clone(),
            director: movie.director.clone(),
            studio: movie.studio.clone(),
            movie_cast: movie.movie_cast.clone(),
            release_year: movie.release_year,
            poster: movie.poster.clone(),
        };
        inner.movies.insert(stored.movie_id, stored.clone());
        Ok(stored)
    }

    async fn update(&self, movie: &Movie) -> Result<Option<Movie>, StoreError> {
        let mut inner = self.inner.write().await;
        match inner.movies.get_mut(&movie.movie_id) {
            Some(existing) => {
                *existing = movie.clone();
                Ok(Some(movie.clone()))
            }
            None => Ok(None),
        }
    }

    async fn delete(&self, id: DbId) -> Result<bool, StoreError> {
        Ok(self.inner.write().await.movies.remove(&id).is_some())
    }
}

/// Order by the sort key in the requested direction, then by ascending id.
fn compare(a: &Movie, b: &Movie, sort: Sort) -> Ordering {
    let by_field = match sort.field {
        SortField::Id => a.movie_id.cmp(&b.movie_id),
        SortField::Title => a.title.cmp(&b.title),
        SortField::Director => a.director.cmp(&b.director),
        SortField::Studio => a.studio.cmp(&b.studio),
        SortField::ReleaseYear => a.release_year.cmp(&b.release_year),
    };
    let by_field = match sort.direction {
        SortDirection::Asc => by_field,
        SortDirection::Desc => by_field.reverse(),
    };
    by_field.then_with(|| a.movie_id.cmp(&b.movie_id))
}
