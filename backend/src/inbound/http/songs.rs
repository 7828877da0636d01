//! Song catalogue HTTP handlers.
//!
//! ```text
//! POST   /api/songs {"group":"Muse","song":"Supermassive Black Hole"}
//! GET    /api/songs?group=muse&releaseDate=2006-07-16&page=1&limit=10
//! GET    /api/songs/{songId}/lyrics?page=1&limit=2
//! PUT    /api/songs/{songId} {"link":"https://example.test/watch"}
//! DELETE /api/songs/{songId}
//! ```

use actix_web::{HttpResponse, delete, get, post, put, web};
use chrono::NaiveDate;
use pagination::{PageError, PageRequest};
use serde::{Deserialize, Serialize};
use serde_json::json;
use utoipa::{IntoParams, ToSchema};

use crate::domain::{Error, LyricsQuery, NewSongRequest, Song, SongId, SongPatch, SongQuery};
use crate::inbound::http::ApiResult;
use crate::inbound::http::schemas::ErrorSchema;
use crate::inbound::http::state::HttpState;

/// Date format used for `releaseDate` on the wire.
pub const API_DATE_FORMAT: &str = "%Y-%m-%d";

/// Request payload for adding a song.
///
/// Missing fields deserialize as empty strings so they are reported as
/// missing rather than as a malformed body.
#[derive(Debug, Default, Deserialize, Serialize, ToSchema)]
pub struct AddSongRequestBody {
    /// Performing group or artist.
    #[serde(default)]
    #[schema(example = "Muse")]
    pub group: String,
    /// Song title.
    #[serde(default)]
    #[schema(example = "Supermassive Black Hole")]
    pub song: String,
}

impl From<AddSongRequestBody> for NewSongRequest {
    fn from(body: AddSongRequestBody) -> Self {
        Self {
            group: body.group,
            title: body.song,
        }
    }
}

/// Response payload carrying a generated song identifier.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
pub struct SongIdResponse {
    /// Identifier of the stored song.
    #[schema(example = "3fa85f64-5717-4562-b3fc-2c963f66afa6")]
    pub id: String,
}

/// Song as returned by the list endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SongResponse {
    /// Song identifier.
    pub id: String,
    /// Performing group or artist.
    pub group: String,
    /// Song title.
    pub title: String,
    /// Release date formatted as `YYYY-MM-DD`.
    #[schema(format = "date", example = "2006-07-16")]
    pub release_date: String,
    /// Full lyrics.
    pub text: String,
    /// External link.
    pub link: String,
}

impl From<Song> for SongResponse {
    fn from(song: Song) -> Self {
        Self {
            id: song.id.to_string(),
            group: song.group,
            title: song.title,
            release_date: song.release_date.format(API_DATE_FORMAT).to_string(),
            text: song.text,
            link: song.link,
        }
    }
}

/// One page of couplets.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
pub struct LyricsResponse {
    /// Couplets joined by a blank line.
    pub lyrics: String,
}

/// Acknowledgement returned by update and delete.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
pub struct StatusResponse {
    /// Always `ok`.
    #[schema(example = "ok")]
    pub status: String,
}

impl StatusResponse {
    fn ok() -> Self {
        Self {
            status: "ok".to_owned(),
        }
    }
}

/// Partial update payload. Absent or empty fields are left unchanged.
#[derive(Debug, Default, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateSongRequestBody {
    /// Replacement group name.
    pub group: Option<String>,
    /// Replacement title.
    pub title: Option<String>,
    /// Replacement release date, `YYYY-MM-DD`.
    #[schema(format = "date", example = "2006-07-16")]
    pub release_date: Option<String>,
    /// Replacement lyrics.
    pub text: Option<String>,
    /// Replacement link.
    pub link: Option<String>,
}

impl TryFrom<UpdateSongRequestBody> for SongPatch {
    type Error = Error;

    fn try_from(body: UpdateSongRequestBody) -> Result<Self, Self::Error> {
        let release_date = non_empty(body.release_date)
            .map(|value| {
                NaiveDate::parse_from_str(&value, API_DATE_FORMAT).map_err(|_| {
                    Error::invalid_request("invalid date format, try yyyy-mm-dd").with_details(
                        json!({
                            "field": "releaseDate",
                            "value": value,
                            "code": "invalid_date",
                        }),
                    )
                })
            })
            .transpose()?;

        Ok(Self {
            group: non_empty(body.group),
            title: non_empty(body.title),
            release_date,
            text: non_empty(body.text),
            link: non_empty(body.link),
        })
    }
}

/// Paging parameters shared by the list and lyrics endpoints.
///
/// Values are kept as text: anything that is not an integer falls back to the
/// default, while integers below one are rejected.
#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct PageParams {
    /// One-based page number, default 1.
    pub page: Option<String>,
    /// Page size, default 10.
    pub limit: Option<String>,
}

impl PageParams {
    fn to_page_request(&self) -> Result<PageRequest, Error> {
        PageRequest::from_query(self.page.as_deref(), self.limit.as_deref())
            .map_err(map_page_error)
    }
}

/// Filters for the list endpoint.
#[derive(Debug, Default, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct ListSongsParams {
    /// Case-insensitive substring of the group name.
    pub group: Option<String>,
    /// Case-insensitive substring of the title.
    pub title: Option<String>,
    /// Exact release date, `YYYY-MM-DD`.
    pub release_date: Option<String>,
    /// Case-insensitive substring of the lyrics.
    pub text: Option<String>,
    /// Case-insensitive substring of the link.
    pub link: Option<String>,
    /// One-based page number, default 1.
    pub page: Option<String>,
    /// Page size, default 10.
    pub limit: Option<String>,
}

impl TryFrom<ListSongsParams> for SongQuery {
    type Error = Error;

    fn try_from(params: ListSongsParams) -> Result<Self, Self::Error> {
        let page = PageParams {
            page: params.page,
            limit: params.limit,
        }
        .to_page_request()?;

        let release_date = non_empty(params.release_date)
            .map(|value| {
                NaiveDate::parse_from_str(&value, API_DATE_FORMAT).map_err(|_| {
                    Error::invalid_request("invalid releaseDate format").with_details(json!({
                        "field": "releaseDate",
                        "value": value,
                        "code": "invalid_date",
                    }))
                })
            })
            .transpose()?;

        Ok(Self {
            group: non_empty(params.group),
            title: non_empty(params.title),
            release_date,
            text: non_empty(params.text),
            link: non_empty(params.link),
            page,
        })
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}

fn map_page_error(err: PageError) -> Error {
    let field = match err {
        PageError::InvalidLimit { .. } => "limit",
        PageError::InvalidPage { .. } | PageError::OutOfRange { .. } => "page",
    };
    Error::invalid_request(err.to_string()).with_details(json!({
        "field": field,
        "code": "invalid_pagination",
    }))
}

/// Add a song, enriching it from the details provider.
#[utoipa::path(
    post,
    path = "/api/songs",
    request_body = AddSongRequestBody,
    responses(
        (status = 200, description = "Song stored", body = SongIdResponse),
        (status = 400, description = "Missing fields or bad provider date", body = ErrorSchema),
        (status = 500, description = "Provider or storage failure", body = ErrorSchema)
    ),
    tags = ["songs"],
    operation_id = "addSong"
)]
#[post("/songs")]
pub async fn add_song(
    state: web::Data<HttpState>,
    payload: web::Json<AddSongRequestBody>,
) -> ApiResult<web::Json<SongIdResponse>> {
    let id = state.songs.create(payload.into_inner().into()).await?;
    Ok(web::Json(SongIdResponse { id: id.to_string() }))
}

/// List songs matching the optional filters, one page at a time.
#[utoipa::path(
    get,
    path = "/api/songs",
    params(ListSongsParams),
    responses(
        (status = 200, description = "Matching songs ordered by id", body = [SongResponse]),
        (status = 400, description = "Invalid filter or paging parameter", body = ErrorSchema),
        (status = 500, description = "Storage failure", body = ErrorSchema)
    ),
    tags = ["songs"],
    operation_id = "listSongs"
)]
#[get("/songs")]
pub async fn list_songs(
    state: web::Data<HttpState>,
    params: web::Query<ListSongsParams>,
) -> ApiResult<web::Json<Vec<SongResponse>>> {
    let query = SongQuery::try_from(params.into_inner())?;
    let songs = state.songs_query.list_songs(query).await?;
    Ok(web::Json(songs.into_iter().map(SongResponse::from).collect()))
}

/// Return one page of couplets from a song's lyrics.
#[utoipa::path(
    get,
    path = "/api/songs/{songId}/lyrics",
    params(
        ("songId" = String, Path, description = "Song identifier"),
        PageParams
    ),
    responses(
        (status = 200, description = "Requested couplets", body = LyricsResponse),
        (status = 400, description = "Page outside the lyrics", body = ErrorSchema),
        (status = 404, description = "Unknown song", body = ErrorSchema),
        (status = 500, description = "Storage failure", body = ErrorSchema)
    ),
    tags = ["songs"],
    operation_id = "getLyrics"
)]
#[get("/songs/{songId}/lyrics")]
pub async fn get_lyrics(
    state: web::Data<HttpState>,
    path: web::Path<String>,
    params: web::Query<PageParams>,
) -> ApiResult<web::Json<LyricsResponse>> {
    let query = LyricsQuery {
        song_id: SongId::new(path.into_inner()),
        page: params.to_page_request()?,
    };
    let lyrics = state.songs_query.lyrics(query).await?;
    Ok(web::Json(LyricsResponse { lyrics }))
}

/// Change selected fields of a song.
#[utoipa::path(
    put,
    path = "/api/songs/{songId}",
    params(("songId" = String, Path, description = "Song identifier")),
    request_body = UpdateSongRequestBody,
    responses(
        (status = 200, description = "Song updated", body = StatusResponse),
        (status = 400, description = "Malformed date or no fields to update", body = ErrorSchema),
        (status = 404, description = "Unknown song", body = ErrorSchema),
        (status = 500, description = "Storage failure", body = ErrorSchema)
    ),
    tags = ["songs"],
    operation_id = "updateSong"
)]
#[put("/songs/{songId}")]
pub async fn update_song(
    state: web::Data<HttpState>,
    path: web::Path<String>,
    payload: web::Json<UpdateSongRequestBody>,
) -> ApiResult<HttpResponse> {
    let patch = SongPatch::try_from(payload.into_inner())?;
    state
        .songs
        .update(SongId::new(path.into_inner()), patch)
        .await?;
    Ok(HttpResponse::Ok().json(StatusResponse::ok()))
}

/// Remove a song.
#[utoipa::path(
    delete,
    path = "/api/songs/{songId}",
    params(("songId" = String, Path, description = "Song identifier")),
    responses(
        (status = 200, description = "Song deleted", body = StatusResponse),
        (status = 404, description = "Unknown song", body = ErrorSchema),
        (status = 500, description = "Storage failure", body = ErrorSchema)
    ),
    tags = ["songs"],
    operation_id = "deleteSong"
)]
#[delete("/songs/{songId}")]
pub async fn delete_song(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<HttpResponse> {
    state.songs.delete(SongId::new(path.into_inner())).await?;
    Ok(HttpResponse::Ok().json(StatusResponse::ok()))
}

/// Register every song handler on `cfg`; mount it under `/api`.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(add_song)
        .service(list_songs)
        .service(get_lyrics)
        .service(update_song)
        .service(delete_song);
}

#[cfg(test)]
#[path = "songs_tests.rs"]
mod tests;
