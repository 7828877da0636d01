//! Internal Diesel row structs for the `songs` table.
//!
//! These never leave the persistence module; the repository converts them to
//! and from the port's `SongRecord`.

use chrono::NaiveDate;
use diesel::prelude::*;

use super::schema::songs;
use crate::domain::SongId;
use crate::domain::ports::{SongField, SongRecord};

/// Row read from `songs`.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = songs)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct SongRow {
    pub id: String,
    pub group_name: String,
    pub title: String,
    pub release_date: NaiveDate,
    pub text: String,
    pub link: String,
}

impl From<SongRow> for SongRecord {
    fn from(row: SongRow) -> Self {
        Self {
            id: SongId::new(row.id),
            group_name: row.group_name,
            title: row.title,
            release_date: row.release_date,
            text: row.text,
            link: row.link,
        }
    }
}

/// Row inserted into `songs`.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = songs)]
pub(crate) struct NewSongRow<'a> {
    pub id: &'a str,
    pub group_name: &'a str,
    pub title: &'a str,
    pub release_date: NaiveDate,
    pub text: &'a str,
    pub link: &'a str,
}

impl<'a> From<&'a SongRecord> for NewSongRow<'a> {
    fn from(record: &'a SongRecord) -> Self {
        Self {
            id: record.id.as_str(),
            group_name: record.group_name.as_str(),
            title: record.title.as_str(),
            release_date: record.release_date,
            text: record.text.as_str(),
            link: record.link.as_str(),
        }
    }
}

/// Partial update of `songs`; `None` columns are left untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq, AsChangeset)]
#[diesel(table_name = songs)]
pub(crate) struct SongChangeset {
    pub group_name: Option<String>,
    pub title: Option<String>,
    pub release_date: Option<NaiveDate>,
    pub text: Option<String>,
    pub link: Option<String>,
}

impl SongChangeset {
    /// Collect column assignments; a later assignment to the same column wins.
    pub(crate) fn from_fields(fields: &[SongField]) -> Self {
        fields
            .iter()
            .cloned()
            .fold(Self::default(), |mut changeset, field| {
                match field {
                    SongField::GroupName(value) => changeset.group_name = Some(value),
                    SongField::Title(value) => changeset.title = Some(value),
                    SongField::ReleaseDate(value) => changeset.release_date = Some(value),
                    SongField::Text(value) => changeset.text = Some(value),
                    SongField::Link(value) => changeset.link = Some(value),
                }
                changeset
            })
    }
}
