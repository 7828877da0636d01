//! Translation between catalogue requests, domain songs and storage records.
//!
//! Everything here is pure. Only the provider-to-storage direction can fail,
//! because the provider reports release dates as `dd.mm.yyyy` text.

use chrono::NaiveDate;

use crate::domain::ports::{SongDetails, SongField, SongRecord, SongRecordFilter, SongRecordUpdate};
use crate::domain::{NewSongRequest, Song, SongId, SongPatch, SongQuery};

/// `chrono` format of release dates reported by the details provider.
pub const PROVIDER_DATE_FORMAT: &str = "%d.%m.%Y";

/// Errors raised while mapping provider data into a storage record.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MappingError {
    /// The provider's release date is not `dd.mm.yyyy`.
    #[error("invalid release date format: {value:?}")]
    InvalidReleaseDate {
        /// Date text as received.
        value: String,
    },
}

impl From<SongRecord> for Song {
    fn from(record: SongRecord) -> Self {
        Self {
            id: record.id,
            group: record.group_name,
            title: record.title,
            release_date: record.release_date,
            text: record.text,
            link: record.link,
        }
    }
}

impl From<Song> for SongRecord {
    fn from(song: Song) -> Self {
        Self {
            id: song.id,
            group_name: song.group,
            title: song.title,
            release_date: song.release_date,
            text: song.text,
            link: song.link,
        }
    }
}

/// Convert a page of storage records into domain songs, preserving order.
pub fn songs_from_records(records: Vec<SongRecord>) -> Vec<Song> {
    records.into_iter().map(Song::from).collect()
}

/// Build the storage update for `patch`, keeping only non-empty fields.
///
/// Returns `None` when the patch changes nothing.
pub fn record_update_from_patch(id: SongId, patch: SongPatch) -> Option<SongRecordUpdate> {
    let SongPatch {
        group,
        title,
        release_date,
        text,
        link,
    } = patch;

    let fields = [
        non_empty(group).map(SongField::GroupName),
        non_empty(title).map(SongField::Title),
        release_date.map(SongField::ReleaseDate),
        non_empty(text).map(SongField::Text),
        non_empty(link).map(SongField::Link),
    ]
    .into_iter()
    .flatten()
    .collect();

    SongRecordUpdate::new(id, fields)
}

/// Translate a listing query into storage predicates and an offset/limit pair.
pub fn record_filter_from_query(query: &SongQuery) -> SongRecordFilter {
    SongRecordFilter {
        group_name: non_empty(query.group.clone()),
        title: non_empty(query.title.clone()),
        release_date: query.release_date,
        text: non_empty(query.text.clone()),
        link: non_empty(query.link.clone()),
        offset: query.page.offset(),
        limit: query.page.limit(),
    }
}

/// Combine the client's group/title with provider details into a new record.
///
/// # Errors
/// Returns [`MappingError::InvalidReleaseDate`] when the provider date is not
/// `dd.mm.yyyy`.
///
/// # Examples
/// ```
/// use songbook::domain::ports::SongDetails;
/// use songbook::domain::song_mapping::record_from_details;
/// use songbook::domain::{NewSongRequest, SongId};
///
/// let record = record_from_details(
///     SongId::new("1"),
///     NewSongRequest { group: "Muse".into(), title: "Supermassive Black Hole".into() },
///     SongDetails { release_date: "16.07.2006".into(), ..SongDetails::default() },
/// )
/// .expect("date parses");
/// assert_eq!(record.release_date.to_string(), "2006-07-16");
/// ```
pub fn record_from_details(
    id: SongId,
    request: NewSongRequest,
    details: SongDetails,
) -> Result<SongRecord, MappingError> {
    let release_date = parse_provider_date(&details.release_date)?;
    Ok(SongRecord {
        id,
        group_name: request.group,
        title: request.title,
        release_date,
        text: details.text,
        link: details.link,
    })
}

/// Parse a `dd.mm.yyyy` provider date.
///
/// # Errors
/// Returns [`MappingError::InvalidReleaseDate`] for any other shape.
pub fn parse_provider_date(value: &str) -> Result<NaiveDate, MappingError> {
    NaiveDate::parse_from_str(value.trim(), PROVIDER_DATE_FORMAT).map_err(|_| {
        MappingError::InvalidReleaseDate {
            value: value.to_owned(),
        }
    })
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|text| !text.is_empty())
}
