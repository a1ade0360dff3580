//! Repository for the `movies` table.

use movieflix_core::movie::{Movie, NewMovie};
use movieflix_core::paging::Sort;
use movieflix_core::types::DbId;
use sqlx::PgPool;

use crate::models::movie::MovieRow;

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str =
    "id, title, director, studio, movie_cast, release_year, poster, created_at, updated_at";

/// Provides CRUD and paging queries for movies.
pub struct MovieRepo;

impl MovieRepo {
    /// Insert a new movie, returning the created row.
    pub async fn create(pool: &PgPool, input: &NewMovie) -> Result<MovieRow, sqlx::Error> {
        let query = format!(
            "INSERT INTO movies (title, director, studio, movie_cast, release_year, poster)
             VALUES ($1, $2, $3, $4, $5, $6)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, MovieRow>(&query)
            .bind(&input.title)
            .bind(&input.director)
            .bind(&input.studio)
            .bind(&input.movie_cast)
            .bind(input.release_year)
            .bind(&input.poster)
            .fetch_one(pool)
            .await
    }

    /// Find a movie by its ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<MovieRow>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM movies WHERE id = $1");
        sqlx::query_as::<_, MovieRow>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List every movie in ID order.
    pub async fn list_all(pool: &PgPool) -> Result<Vec<MovieRow>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM movies ORDER BY id ASC");
        sqlx::query_as::<_, MovieRow>(&query).fetch_all(pool).await
    }

    /// List one page of movies together with the total row count.
    ///
    /// Both statements run in one repeatable-read transaction so the total
    /// always describes the same snapshot as the returned rows. The ORDER BY
    /// column comes from [`Sort`], a closed enum, so no caller string ever
    /// reaches the SQL text. Ties are broken by ascending ID.
    pub async fn list_page(
        pool: &PgPool,
        sort: Option<Sort>,
        limit: i64,
        offset: i64,
    ) -> Result<(Vec<MovieRow>, i64), sqlx::Error> {
        let order_by = match sort {
            Some(sort) => format!("{} {}, id ASC", sort.field.column(), sort.direction.as_sql()),
            None => "id ASC".to_string(),
        };
        let query = format!(
            "SELECT {COLUMNS} FROM movies \
             ORDER BY {order_by} \
             LIMIT $1 OFFSET $2"
        );

        let mut tx = pool.begin().await?;
        sqlx::query("SET TRANSACTION ISOLATION LEVEL REPEATABLE READ READ ONLY")
            .execute(&mut *tx)
            .await?;

        let rows = sqlx::query_as::<_, MovieRow>(&query)
            .bind(limit)
            .bind(offset)
            .fetch_all(&mut *tx)
            .await?;
        let total = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM movies")
            .fetch_one(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok((rows, total))
    }

    /// Replace every mutable column of a movie.
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn update(pool: &PgPool, movie: &Movie) -> Result<Option<MovieRow>, sqlx::Error> {
        let query = format!(
            "UPDATE movies SET
                title = $2,
                director = $3,
                studio = $4,
                movie_cast = $5,
                release_year = $6,
                poster = $7
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, MovieRow>(&query)
            .bind(movie.movie_id)
            .bind(&movie.title)
            .bind(&movie.director)
            .bind(&movie.studio)
            .bind(&movie.movie_cast)
            .bind(movie.release_year)
            .bind(&movie.poster)
            .fetch_optional(pool)
            .await
    }

    /// Delete a movie by ID. Returns `true` if a row was removed.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM movies WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
