//! Song catalogue entities and the request shapes accepted by the catalogue
//! use-cases.

use chrono::NaiveDate;
use pagination::PageRequest;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Opaque song identifier.
///
/// Generated by the service when a song is created; clients never choose it.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SongId(String);

impl SongId {
    /// Wrap an identifier received from a client or the store.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Generate a fresh identifier for a new song.
    #[must_use]
    pub fn generate() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    /// Borrow the identifier text.
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl std::fmt::Display for SongId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for SongId {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

/// A catalogued song.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Song {
    /// Immutable identifier.
    pub id: SongId,
    /// Performing group or artist.
    pub group: String,
    /// Song title.
    pub title: String,
    /// Release date without a time component.
    pub release_date: NaiveDate,
    /// Full lyrics; couplets are separated by a blank line.
    pub text: String,
    /// External link, usually a video URL.
    pub link: String,
}

/// Client input for adding a song to the catalogue.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewSongRequest {
    /// Performing group or artist.
    pub group: String,
    /// Song title.
    pub title: String,
}

/// Field-by-field changes for an existing song.
///
/// `None` and empty strings both mean "leave unchanged".
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SongPatch {
    /// Replacement group name.
    pub group: Option<String>,
    /// Replacement title.
    pub title: Option<String>,
    /// Replacement release date.
    pub release_date: Option<NaiveDate>,
    /// Replacement lyrics.
    pub text: Option<String>,
    /// Replacement link.
    pub link: Option<String>,
}

/// Search criteria for listing songs.
///
/// Text criteria match case-insensitive substrings; the release date must
/// match exactly.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SongQuery {
    /// Substring of the group name.
    pub group: Option<String>,
    /// Substring of the title.
    pub title: Option<String>,
    /// Exact release date.
    pub release_date: Option<NaiveDate>,
    /// Substring of the lyrics.
    pub text: Option<String>,
    /// Substring of the link.
    pub link: Option<String>,
    /// Requested page of results.
    pub page: PageRequest,
}

/// Request for one page of couplets from a song's lyrics.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LyricsQuery {
    /// Song whose lyrics are paged.
    pub song_id: SongId,
    /// Requested page of couplets.
    pub page: PageRequest,
}
