//! Movie entity row.

use movieflix_core::movie::Movie;
use movieflix_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// A row from the `movies` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct MovieRow {
    pub id: DbId,
    pub title: String,
    pub director: String,
    pub studio: String,
    pub movie_cast: Vec<String>,
    pub release_year: i32,
    pub poster: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl From<MovieRow> for Movie {
    fn from(row: MovieRow) -> Self {
        Movie {
            movie_id: row.id,
            title: row.title,
            director: row.director,
            studio: row.studio,
            movie_cast: row.movie_cast,
            release_year: row.release_year,
            poster: row.poster,
        }
    }
}
