//! Persistence port for movie records.
//!
//! [`crate::catalog::CatalogService`] only talks to this trait. The
//! PostgreSQL adapter lives in `movieflix-db`; [`crate::memory`] provides an
//! in-process implementation.

use async_trait::async_trait;

use crate::movie::{Movie, NewMovie};
use crate::paging::{PageRequest, Sort};
use crate::types::DbId;

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("Database error: {0}")]
    Database(String),
    #[error("Duplicate value: {0}")]
    Duplicate(String),
    #[error("Store unavailable: {0}")]
    Unavailable(String),
}

/// Records on one page and the total number of records in the store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MovieSlice {
    pub movies: Vec<Movie>,
    pub total: i64,
}

#[async_trait]
pub trait MovieStore: Send + Sync {
    /// Cheap liveness probe used by the health endpoint.
    async fn health_check(&self) -> Result<(), StoreError>;

    async fn find_by_id(&self, id: DbId) -> Result<Option<Movie>, StoreError>;

    /// Every record in primary-key order.
    async fn find_all(&self) -> Result<Vec<Movie>, StoreError>;

    /// One page of records. Without a sort, primary-key order is used; with
    /// one, ties are broken by ascending id.
    async fn find_page(
        &self,
        request: PageRequest,
        sort: Option<Sort>,
    ) -> Result<MovieSlice, StoreError>;

    /// Insert a record and return it with its assigned id.
    async fn insert(&self, movie: &NewMovie) -> Result<Movie, StoreError>;

    /// Replace every field of an existing record. `None` if the id is unknown.
    async fn update(&self, movie: &Movie) -> Result<Option<Movie>, StoreError>;

    /// Remove a record. Returns `true` if one was removed.
    async fn delete(&self, id: DbId) -> Result<bool, StoreError>;
}
