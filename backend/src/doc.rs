//! OpenAPI documentation configuration.
//!
//! [`ApiDoc`] registers the song catalogue endpoints, the health probes and
//! the error schema wrappers from `inbound::http::schemas`. Debug builds serve
//! it through Swagger UI at `/docs`.

use crate::inbound::http::schemas::{ErrorCodeSchema, ErrorSchema};
use crate::inbound::http::songs::{
    AddSongRequestBody, LyricsResponse, SongIdResponse, SongResponse, StatusResponse,
    UpdateSongRequestBody,
};
use utoipa::OpenApi;

/// OpenAPI document for the REST API.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Songbook API",
        description = "Song catalogue with provider enrichment, filtered listing and paged lyrics."
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    paths(
        crate::inbound::http::songs::add_song,
        crate::inbound::http::songs::list_songs,
        crate::inbound::http::songs::get_lyrics,
        crate::inbound::http::songs::update_song,
        crate::inbound::http::songs::delete_song,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(
        AddSongRequestBody,
        UpdateSongRequestBody,
        SongIdResponse,
        SongResponse,
        LyricsResponse,
        StatusResponse,
        ErrorSchema,
        ErrorCodeSchema
    )),
    tags(
        (name = "songs", description = "Song catalogue operations"),
        (name = "health", description = "Endpoints for health checks")
    )
)]
pub struct ApiDoc;
