//! Movie record, client-supplied metadata, and the projected catalog entry.
//!
//! The record only ever stores the poster's *filename*. The public URL is
//! derived at response time by [`MovieDto::from_movie`] and never persisted.

use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::types::DbId;

/// Fixed path segment between the base URL and a poster filename.
pub const POSTER_URL_PREFIX: &str = "/file/";

/// A persisted movie record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Movie {
    pub movie_id: DbId,
    pub title: String,
    pub director: String,
    pub studio: String,
    pub movie_cast: Vec<String>,
    pub release_year: i32,
    /// Stored poster filename, relative to the poster directory.
    pub poster: String,
}

/// A record about to be inserted; the store assigns the id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewMovie {
    pub title: String,
    pub director: String,
    pub studio: String,
    pub movie_cast: Vec<String>,
    pub release_year: i32,
    pub poster: String,
}

/// Movie metadata as submitted by a client on add or update.
///
/// Any id, poster or URL the client sends along is ignored: ids belong to the
/// store and poster names to the catalog.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct MovieDetails {
    #[validate(custom(function = "not_blank", message = "Please provide movie's title!"))]
    pub title: String,
    #[validate(custom(function = "not_blank", message = "Please provide movie's director!"))]
    pub director: String,
    #[validate(custom(function = "not_blank", message = "Please provide movie's studio!"))]
    pub studio: String,
    #[serde(default)]
    pub movie_cast: Vec<String>,
    pub release_year: i32,
}

impl MovieDetails {
    /// Build an insertable record pointing at `poster`.
    pub fn into_new_movie(self, poster: String) -> NewMovie {
        NewMovie {
            title: self.title,
            director: self.director,
            studio: self.studio,
            movie_cast: self.movie_cast,
            release_year: self.release_year,
            poster,
        }
    }

    /// Replace every field of `movie_id`'s record, keeping `poster`.
    pub fn into_movie(self, movie_id: DbId, poster: String) -> Movie {
        Movie {
            movie_id,
            title: self.title,
            director: self.director,
            studio: self.studio,
            movie_cast: self.movie_cast,
            release_year: self.release_year,
            poster,
        }
    }
}

fn not_blank(value: &str) -> Result<(), validator::ValidationError> {
    if value.trim().is_empty() {
        return Err(validator::ValidationError::new("blank"));
    }
    Ok(())
}

/// A movie record projected for clients, with its poster URL.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MovieDto {
    pub movie_id: DbId,
    pub title: String,
    pub director: String,
    pub studio: String,
    pub movie_cast: Vec<String>,
    pub release_year: i32,
    pub poster: String,
    pub poster_url: String,
}

impl MovieDto {
    pub fn from_movie(movie: Movie, base_url: &str) -> Self {
        let poster_url = poster_url(base_url, &movie.poster);
        Self {
            movie_id: movie.movie_id,
            title: movie.title,
            director: movie.director,
            studio: movie.studio,
            movie_cast: movie.movie_cast,
            release_year: movie.release_year,
            poster: movie.poster,
            poster_url,
        }
    }
}

/// `base_url` + `/file/` + `poster`, tolerating a trailing slash on the base.
pub fn poster_url(base_url: &str, poster: &str) -> String {
    format!(
        "{}{POSTER_URL_PREFIX}{poster}",
        base_url.trim_end_matches('/')
    )
}
