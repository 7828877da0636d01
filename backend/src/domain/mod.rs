//! Domain primitives, services and ports.
//!
//! Purpose: hold the song catalogue rules independently of HTTP and
//! PostgreSQL. Adapters in `inbound` and `outbound` depend on this module,
//! never the other way round.
//!
//! Public surface:
//! - DomainError (re-exported as `Error`) / ErrorCode: transport-agnostic
//!   failure payload.
//! - Song and the catalogue request shapes (`NewSongRequest`, `SongPatch`,
//!   `SongQuery`, `LyricsQuery`).
//! - SongCatalogService: implementation of the catalogue driving ports.
//! - TraceId: request correlation identifier.

pub mod error;
pub mod lyrics;
pub mod ports;
pub mod song;
pub mod song_catalog_service;
pub mod song_mapping;
pub mod trace_id;

pub use self::error::{DomainError, DomainError as Error, ErrorCode};
pub use self::song::{LyricsQuery, NewSongRequest, Song, SongId, SongPatch, SongQuery};
pub use self::song_catalog_service::SongCatalogService;
pub use self::trace_id::{TRACE_ID_HEADER, TraceId};
