//! Domain ports and supporting types for the hexagonal boundary.

mod macros;
pub(crate) use macros::define_port_error;

mod song_catalog_command;
mod song_catalog_query;
mod song_details_source;
mod song_repository;

#[cfg(test)]
pub use song_catalog_command::MockSongCatalogCommand;
pub use song_catalog_command::{FixtureSongCatalogCommand, SongCatalogCommand};
#[cfg(test)]
pub use song_catalog_query::MockSongCatalogQuery;
pub use song_catalog_query::{FixtureSongCatalogQuery, SongCatalogQuery};
#[cfg(test)]
pub use song_details_source::MockSongDetailsSource;
pub use song_details_source::{
    FixtureSongDetailsSource, SongDetails, SongDetailsRequest, SongDetailsSource,
    SongDetailsSourceError,
};
#[cfg(test)]
pub use song_repository::MockSongRepository;
pub use song_repository::{
    FixtureSongRepository, SongField, SongRecord, SongRecordFilter, SongRecordUpdate,
    SongRepository, SongRepositoryError,
};
