//! Driving port for catalogue mutations.
//!
//! HTTP handlers depend on this port rather than on the service type so they
//! can be exercised against fixtures or mocks.

use async_trait::async_trait;

use crate::domain::{Error, NewSongRequest, SongId, SongPatch};

/// Use-case port for adding, changing and removing songs.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SongCatalogCommand: Send + Sync {
    /// Enrich and store a new song, returning its generated identifier.
    async fn create(&self, request: NewSongRequest) -> Result<SongId, Error>;

    /// Apply the non-empty fields of `patch` to an existing song.
    async fn update(&self, id: SongId, patch: SongPatch) -> Result<(), Error>;

    /// Remove a song.
    async fn delete(&self, id: SongId) -> Result<(), Error>;
}

/// Fixture command accepting every request.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureSongCatalogCommand;

#[async_trait]
impl SongCatalogCommand for FixtureSongCatalogCommand {
    async fn create(&self, _request: NewSongRequest) -> Result<SongId, Error> {
        Ok(SongId::generate())
    }

    async fn update(&self, _id: SongId, _patch: SongPatch) -> Result<(), Error> {
        Ok(())
    }

    async fn delete(&self, _id: SongId) -> Result<(), Error> {
        Ok(())
    }
}
