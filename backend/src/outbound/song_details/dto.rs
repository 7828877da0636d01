//! DTOs for decoding details provider responses.

use serde::Deserialize;

use crate::domain::ports::SongDetails;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct SongDetailsDto {
    #[serde(default)]
    pub(super) release_date: String,
    #[serde(default)]
    pub(super) text: String,
    #[serde(default)]
    pub(super) link: String,
}

impl From<SongDetailsDto> for SongDetails {
    fn from(dto: SongDetailsDto) -> Self {
        Self {
            release_date: dto.release_date,
            text: dto.text,
            link: dto.link,
        }
    }
}
