//! Shared HTTP adapter state.
//!
//! HTTP handlers accept this state via `actix_web::web::Data` so they only
//! depend on domain ports (use-cases) and remain testable without I/O.

use std::sync::Arc;

use crate::domain::ports::{
    FixtureSongCatalogCommand, FixtureSongCatalogQuery, SongCatalogCommand, SongCatalogQuery,
};

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    /// Catalogue mutations.
    pub songs: Arc<dyn SongCatalogCommand>,
    /// Catalogue reads.
    pub songs_query: Arc<dyn SongCatalogQuery>,
}

impl HttpState {
    /// Construct state from the catalogue ports.
    ///
    /// # Examples
    /// ```
    /// use std::sync::Arc;
    ///
    /// use songbook::domain::ports::{FixtureSongCatalogCommand, FixtureSongCatalogQuery};
    /// use songbook::inbound::http::state::HttpState;
    ///
    /// let state = HttpState::new(
    ///     Arc::new(FixtureSongCatalogCommand),
    ///     Arc::new(FixtureSongCatalogQuery),
    /// );
    /// let _songs = state.songs.clone();
    /// ```
    pub fn new(songs: Arc<dyn SongCatalogCommand>, songs_query: Arc<dyn SongCatalogQuery>) -> Self {
        Self { songs, songs_query }
    }

    /// Wire a single service that implements both catalogue ports.
    pub fn from_service<S>(service: Arc<S>) -> Self
    where
        S: SongCatalogCommand + SongCatalogQuery + 'static,
    {
        Self {
            songs: service.clone(),
            songs_query: service,
        }
    }
}

impl Default for HttpState {
    fn default() -> Self {
        Self::new(
            Arc::new(FixtureSongCatalogCommand),
            Arc::new(FixtureSongCatalogQuery),
        )
    }
}
