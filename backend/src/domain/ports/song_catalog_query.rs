//! Driving port for catalogue reads.

use async_trait::async_trait;

use crate::domain::{Error, LyricsQuery, Song, SongQuery};

/// Use-case port for listing songs and paging through lyrics.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SongCatalogQuery: Send + Sync {
    /// List one page of songs matching `query`. No match is an empty list.
    async fn list_songs(&self, query: SongQuery) -> Result<Vec<Song>, Error>;

    /// Return one page of couplets from a song's lyrics.
    async fn lyrics(&self, query: LyricsQuery) -> Result<String, Error>;
}

/// Fixture query backed by an empty catalogue.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureSongCatalogQuery;

#[async_trait]
impl SongCatalogQuery for FixtureSongCatalogQuery {
    async fn list_songs(&self, _query: SongQuery) -> Result<Vec<Song>, Error> {
        Ok(Vec::new())
    }

    async fn lyrics(&self, query: LyricsQuery) -> Result<String, Error> {
        Err(Error::not_found(format!(
            "song with id {} not found",
            query.song_id
        )))
    }
}
