//! Driven port for durable song storage.
//!
//! The catalogue service speaks to storage in storage-shaped records so the
//! persistence adapter can stay a thin translation onto its row types.

use async_trait::async_trait;
use chrono::NaiveDate;

use super::define_port_error;
use crate::domain::SongId;

/// Song as held by the store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SongRecord {
    /// Primary key.
    pub id: SongId,
    /// Performing group.
    pub group_name: String,
    /// Song title.
    pub title: String,
    /// Release date.
    pub release_date: NaiveDate,
    /// Full lyrics.
    pub text: String,
    /// External link.
    pub link: String,
}

/// Storage predicates for a song listing.
///
/// Text predicates are case-insensitive substring matches; `release_date` is
/// an exact match. Rows are returned in primary-key order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SongRecordFilter {
    /// Substring of the group name.
    pub group_name: Option<String>,
    /// Substring of the title.
    pub title: Option<String>,
    /// Exact release date.
    pub release_date: Option<NaiveDate>,
    /// Substring of the lyrics.
    pub text: Option<String>,
    /// Substring of the link.
    pub link: Option<String>,
    /// Rows skipped before the page starts.
    pub offset: u64,
    /// Maximum rows returned.
    pub limit: u64,
}

/// One column assignment in a partial update.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SongField {
    /// New group name.
    GroupName(String),
    /// New title.
    Title(String),
    /// New release date.
    ReleaseDate(NaiveDate),
    /// New lyrics.
    Text(String),
    /// New link.
    Link(String),
}

/// Partial update of a stored song; holds at least one field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SongRecordUpdate {
    id: SongId,
    fields: Vec<SongField>,
}

impl SongRecordUpdate {
    /// Build an update, returning `None` when there is nothing to change.
    pub fn new(id: SongId, fields: Vec<SongField>) -> Option<Self> {
        if fields.is_empty() {
            None
        } else {
            Some(Self { id, fields })
        }
    }

    /// Song being updated.
    pub fn id(&self) -> &SongId {
        &self.id
    }

    /// Column assignments in request order.
    pub fn fields(&self) -> &[SongField] {
        &self.fields
    }
}

define_port_error! {
    /// Errors raised by song storage adapters.
    pub enum SongRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } => "song repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } => "song repository query failed: {message}",
        /// No song exists with the given identifier.
        NotFound { id: String } => "song with id {id} not found",
    }
}

/// Port for storing and retrieving songs.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SongRepository: Send + Sync {
    /// Insert a new song.
    async fn create(&self, record: &SongRecord) -> Result<(), SongRepositoryError>;

    /// List songs matching `filter`, one page at a time.
    async fn list(&self, filter: &SongRecordFilter)
    -> Result<Vec<SongRecord>, SongRepositoryError>;

    /// Fetch the full lyrics of one song.
    ///
    /// Fails with [`SongRepositoryError::NotFound`] when the song is absent.
    async fn lyrics_text(&self, id: &SongId) -> Result<String, SongRepositoryError>;

    /// Apply a partial update.
    ///
    /// Fails with [`SongRepositoryError::NotFound`] when no row matched.
    async fn update(&self, update: &SongRecordUpdate) -> Result<(), SongRepositoryError>;

    /// Delete one song after confirming it exists.
    ///
    /// Fails with [`SongRepositoryError::NotFound`] when the song is absent.
    async fn delete(&self, id: &SongId) -> Result<(), SongRepositoryError>;
}

/// Fixture repository holding no songs.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureSongRepository;

#[async_trait]
impl SongRepository for FixtureSongRepository {
    async fn create(&self, _record: &SongRecord) -> Result<(), SongRepositoryError> {
        Ok(())
    }

    async fn list(
        &self,
        _filter: &SongRecordFilter,
    ) -> Result<Vec<SongRecord>, SongRepositoryError> {
        Ok(Vec::new())
    }

    async fn lyrics_text(&self, id: &SongId) -> Result<String, SongRepositoryError> {
        Err(SongRepositoryError::not_found(id.as_str()))
    }

    async fn update(&self, update: &SongRecordUpdate) -> Result<(), SongRepositoryError> {
        Err(SongRepositoryError::not_found(update.id().as_str()))
    }

    async fn delete(&self, id: &SongId) -> Result<(), SongRepositoryError> {
        Err(SongRepositoryError::not_found(id.as_str()))
    }
}
