//! PostgreSQL-backed `SongRepository` implementation using Diesel ORM.
//!
//! Filters, partial updates and pagination are expressed through Diesel's
//! query builder, so every user-supplied value travels as a bind parameter.

use async_trait::async_trait;
use diesel::dsl::exists;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use tracing::debug;

use crate::domain::SongId;
use crate::domain::ports::{
    SongRecord, SongRecordFilter, SongRecordUpdate, SongRepository, SongRepositoryError,
};

use super::models::{NewSongRow, SongChangeset, SongRow};
use super::pool::{DbPool, PoolError};
use super::schema::songs;

/// Diesel-backed implementation of the `SongRepository` port.
#[derive(Clone)]
pub struct DieselSongRepository {
    pool: DbPool,
}

impl DieselSongRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> SongRepositoryError {
    SongRepositoryError::connection(error.message())
}

fn map_diesel_error(error: diesel::result::Error) -> SongRepositoryError {
    use diesel::result::{DatabaseErrorKind, Error as DieselError};

    match &error {
        DieselError::DatabaseError(kind, info) => {
            debug!(?kind, message = info.message(), "diesel operation failed");
        }
        _ => debug!(error = %error, "diesel operation failed"),
    }

    match error {
        DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, _) => {
            SongRepositoryError::query("song already exists")
        }
        DieselError::DatabaseError(DatabaseErrorKind::ClosedConnection, _) => {
            SongRepositoryError::connection("database connection error")
        }
        DieselError::QueryBuilderError(_) => SongRepositoryError::query("database query error"),
        _ => SongRepositoryError::query("database error"),
    }
}

/// Wrap a filter value in `%` so `ILIKE` matches it anywhere in the column.
///
/// `%` and `_` inside the value keep their wildcard meaning.
fn contains_pattern(value: &str) -> String {
    format!("%{value}%")
}

/// Offset and limit as `BIGINT`s. Values past `i64::MAX` clamp to it, which
/// PostgreSQL treats as "no more rows" for the offset and "all rows" for the limit.
fn page_bounds(filter: &SongRecordFilter) -> (i64, i64) {
    (
        i64::try_from(filter.offset).unwrap_or(i64::MAX),
        i64::try_from(filter.limit).unwrap_or(i64::MAX),
    )
}

#[async_trait]
impl SongRepository for DieselSongRepository {
    async fn create(&self, record: &SongRecord) -> Result<(), SongRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        diesel::insert_into(songs::table)
            .values(NewSongRow::from(record))
            .execute(&mut conn)
            .await
            .map(|_| ())
            .map_err(map_diesel_error)
    }

    async fn list(
        &self,
        filter: &SongRecordFilter,
    ) -> Result<Vec<SongRecord>, SongRepositoryError> {
        let (offset, limit) = page_bounds(filter);
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let mut query = songs::table.select(SongRow::as_select()).into_boxed();
        if let Some(group_name) = &filter.group_name {
            query = query.filter(songs::group_name.ilike(contains_pattern(group_name)));
        }
        if let Some(title) = &filter.title {
            query = query.filter(songs::title.ilike(contains_pattern(title)));
        }
        if let Some(release_date) = filter.release_date {
            query = query.filter(songs::release_date.eq(release_date));
        }
        if let Some(text) = &filter.text {
            query = query.filter(songs::text.ilike(contains_pattern(text)));
        }
        if let Some(link) = &filter.link {
            query = query.filter(songs::link.ilike(contains_pattern(link)));
        }

        let rows: Vec<SongRow> = query
            .order(songs::id.asc())
            .offset(offset)
            .limit(limit)
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        Ok(rows.into_iter().map(SongRecord::from).collect())
    }

    async fn lyrics_text(&self, id: &SongId) -> Result<String, SongRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        songs::table
            .find(id.as_str())
            .select(songs::text)
            .first::<String>(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?
            .ok_or_else(|| SongRepositoryError::not_found(id.as_str()))
    }

    async fn update(&self, update: &SongRecordUpdate) -> Result<(), SongRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let changeset = SongChangeset::from_fields(update.fields());

        diesel::update(songs::table.find(update.id().as_str()))
            .set(&changeset)
            .returning(songs::id)
            .get_result::<String>(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?
            .map(|_| ())
            .ok_or_else(|| SongRepositoryError::not_found(update.id().as_str()))
    }

    async fn delete(&self, id: &SongId) -> Result<(), SongRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let present: bool = diesel::select(exists(songs::table.find(id.as_str())))
            .get_result(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        if !present {
            return Err(SongRepositoryError::not_found(id.as_str()));
        }

        let deleted = diesel::delete(songs::table.find(id.as_str()))
            .execute(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        if deleted == 0 {
            return Err(SongRepositoryError::not_found(id.as_str()));
        }
        Ok(())
    }
}
