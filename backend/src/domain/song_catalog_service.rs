//! Song catalogue service.
//!
//! Implements the catalogue driving ports on top of the storage and details
//! provider ports. The service owns validation, enrichment ordering, couplet
//! paging and the translation of port failures into domain [`Error`]s; it
//! keeps no state between calls.

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::json;
use tracing::{debug, error, info, warn};

use crate::domain::lyrics::page_of_couplets;
use crate::domain::ports::{
    SongCatalogCommand, SongCatalogQuery, SongDetailsRequest, SongDetailsSource,
    SongDetailsSourceError, SongRepository, SongRepositoryError,
};
use crate::domain::song_mapping::{
    MappingError, record_filter_from_query, record_from_details, record_update_from_patch,
    songs_from_records,
};
use crate::domain::{Error, LyricsQuery, NewSongRequest, Song, SongId, SongPatch, SongQuery};

/// Message returned when an update carries no usable field.
const NO_UPDATE_FIELDS: &str = "invalid or missing fields in the request body";

/// Client-facing message for provider failures. The provider error itself
/// can carry internal URLs and response bodies, so it only goes to the log.
const DETAILS_UNAVAILABLE: &str = "failed to fetch song details";

/// Message returned when a lyrics page starts after the last couplet.
const LYRICS_PAGE_OUT_OF_RANGE: &str =
    "no lyrics found for the specified page: invalid pagination parameters";

fn map_repository_error(context: &str, error: SongRepositoryError) -> Error {
    match error {
        SongRepositoryError::NotFound { id } => {
            Error::not_found(format!("song with id {id} not found"))
        }
        SongRepositoryError::Connection { message } | SongRepositoryError::Query { message } => {
            Error::persistence_failed(format!("{context}: {message}"))
        }
    }
}

fn map_details_error(error: SongDetailsSourceError) -> Error {
    let details = match &error {
        SongDetailsSourceError::Transport { .. } => {
            json!({ "code": "enrichment_failed", "reason": "transport" })
        }
        SongDetailsSourceError::Timeout { .. } => {
            json!({ "code": "enrichment_failed", "reason": "timeout" })
        }
        SongDetailsSourceError::Status { status, .. } => {
            json!({ "code": "enrichment_failed", "reason": "status", "status": status })
        }
        SongDetailsSourceError::Decode { .. } => {
            json!({ "code": "enrichment_failed", "reason": "decode" })
        }
    };
    error!(error = %error, "song details lookup failed");
    Error::enrichment_failed(DETAILS_UNAVAILABLE).with_details(details)
}

fn map_mapping_error(error: MappingError) -> Error {
    match error {
        MappingError::InvalidReleaseDate { value } => Error::invalid_request(format!(
            "failed to map song details: invalid release date format {value:?}"
        ))
        .with_details(json!({ "field": "releaseDate", "code": "invalid_release_date" })),
    }
}

fn validate_new_song(request: &NewSongRequest) -> Result<(), Error> {
    let missing: Vec<&str> = [("group", &request.group), ("song", &request.title)]
        .into_iter()
        .filter(|(_, value)| value.trim().is_empty())
        .map(|(field, _)| field)
        .collect();

    if missing.is_empty() {
        Ok(())
    } else {
        Err(
            Error::invalid_request("missing required fields: group or song")
                .with_details(json!({ "fields": missing, "code": "missing_field" })),
        )
    }
}

/// Catalogue service implementing the command and query driving ports.
#[derive(Clone)]
pub struct SongCatalogService<R, D> {
    repository: Arc<R>,
    details: Arc<D>,
}

impl<R, D> SongCatalogService<R, D> {
    /// Create a new service with the given store and details provider.
    pub fn new(repository: Arc<R>, details: Arc<D>) -> Self {
        Self {
            repository,
            details,
        }
    }
}

#[async_trait]
impl<R, D> SongCatalogCommand for SongCatalogService<R, D>
where
    R: SongRepository,
    D: SongDetailsSource,
{
    async fn create(&self, request: NewSongRequest) -> Result<SongId, Error> {
        validate_new_song(&request)?;
        let id = SongId::generate();

        debug!(group = %request.group, title = %request.title, "fetching song details");
        let details = self
            .details
            .fetch_details(&SongDetailsRequest {
                group: request.group.clone(),
                title: request.title.clone(),
            })
            .await
            .map_err(map_details_error)?;

        let record = record_from_details(id.clone(), request, details).map_err(map_mapping_error)?;

        debug!(song_id = %id, "saving song");
        self.repository
            .create(&record)
            .await
            .map_err(|err| map_repository_error("failed to save song", err))?;

        info!(song_id = %id, "song created");
        Ok(id)
    }

    async fn update(&self, id: SongId, patch: SongPatch) -> Result<(), Error> {
        debug!(song_id = %id, "updating song");
        let update = record_update_from_patch(id, patch).ok_or_else(|| {
            Error::invalid_request(NO_UPDATE_FIELDS).with_details(json!({ "code": "no_fields" }))
        })?;

        self.repository
            .update(&update)
            .await
            .map_err(|err| map_repository_error("failed to update song", err))?;

        info!(song_id = %update.id(), fields = update.fields().len(), "song updated");
        Ok(())
    }

    async fn delete(&self, id: SongId) -> Result<(), Error> {
        debug!(song_id = %id, "deleting song");
        self.repository
            .delete(&id)
            .await
            .map_err(|err| map_repository_error("failed to delete song", err))?;

        info!(song_id = %id, "song deleted");
        Ok(())
    }
}

#[async_trait]
impl<R, D> SongCatalogQuery for SongCatalogService<R, D>
where
    R: SongRepository,
    D: SongDetailsSource,
{
    async fn list_songs(&self, query: SongQuery) -> Result<Vec<Song>, Error> {
        debug!(?query, "listing songs");
        let records = self
            .repository
            .list(&record_filter_from_query(&query))
            .await
            .map_err(|err| map_repository_error("failed to get songs", err))?;

        if records.is_empty() {
            warn!(?query, "no songs found for filters");
        }
        Ok(songs_from_records(records))
    }

    async fn lyrics(&self, query: LyricsQuery) -> Result<String, Error> {
        debug!(
            song_id = %query.song_id,
            page = query.page.page(),
            limit = query.page.limit(),
            "fetching lyrics"
        );
        let text = self
            .repository
            .lyrics_text(&query.song_id)
            .await
            .map_err(|err| map_repository_error("failed to get lyrics", err))?;

        page_of_couplets(&text, query.page).map_err(|err| {
            debug!(song_id = %query.song_id, error = %err, "lyrics page out of range");
            Error::invalid_request(LYRICS_PAGE_OUT_OF_RANGE)
                .with_details(json!({ "code": "invalid_pagination" }))
        })
    }
}

#[cfg(test)]
#[path = "song_catalog_service_tests.rs"]
mod tests;
