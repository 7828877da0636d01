//! Tests for song catalogue handlers.

use super::*;
use crate::domain::ports::{
    FixtureSongCatalogCommand, FixtureSongCatalogQuery, MockSongCatalogCommand,
    MockSongCatalogQuery,
};
use crate::inbound::http::error::{
    INVALID_BODY_MESSAGE, INVALID_QUERY_MESSAGE, json_error_handler, query_error_handler,
};
use actix_web::http::StatusCode;
use actix_web::{App, test as actix_test, web};
use mockall::predicate::eq;
use rstest::rstest;
use serde_json::{Value, json};
use std::sync::Arc;

fn test_app(
    state: HttpState,
) -> App<
    impl actix_web::dev::ServiceFactory<
        actix_web::dev::ServiceRequest,
        Config = (),
        Response = actix_web::dev::ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    App::new()
        .app_data(web::Data::new(state))
        .app_data(web::JsonConfig::default().error_handler(json_error_handler))
        .app_data(web::QueryConfig::default().error_handler(query_error_handler))
        .service(web::scope("/api").configure(configure))
}

fn with_command(command: MockSongCatalogCommand) -> HttpState {
    HttpState::new(Arc::new(command), Arc::new(FixtureSongCatalogQuery))
}

fn with_query(query: MockSongCatalogQuery) -> HttpState {
    HttpState::new(Arc::new(FixtureSongCatalogCommand), Arc::new(query))
}

async fn call(state: HttpState, request: actix_test::TestRequest) -> (StatusCode, Value) {
    let app = actix_test::init_service(test_app(state)).await;
    let response = actix_test::call_service(&app, request.to_request()).await;
    let status = response.status();
    let body = actix_test::read_body(response).await;
    let value = if body.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&body).expect("JSON body")
    };
    (status, value)
}

fn sample_song() -> Song {
    Song {
        id: SongId::new("song-1"),
        group: "Muse".to_owned(),
        title: "Supermassive Black Hole".to_owned(),
        release_date: NaiveDate::from_ymd_opt(2006, 7, 16).expect("valid date"),
        text: "Ooh baby\n\nI thought I was a fool".to_owned(),
        link: "https://www.youtube.com/watch?v=Xsp3_a-PMTw".to_owned(),
    }
}

#[rstest]
#[actix_web::test]
async fn add_song_returns_generated_id() {
    let mut command = MockSongCatalogCommand::new();
    command
        .expect_create()
        .with(eq(NewSongRequest {
            group: "Muse".to_owned(),
            title: "Supermassive Black Hole".to_owned(),
        }))
        .times(1)
        .return_once(|_| Ok(SongId::new("generated-id")));

    let (status, body) = call(
        with_command(command),
        actix_test::TestRequest::post()
            .uri("/api/songs")
            .set_json(json!({"group": "Muse", "song": "Supermassive Black Hole"})),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"id": "generated-id"}));
}

#[rstest]
#[actix_web::test]
async fn add_song_passes_missing_fields_to_validation() {
    let mut command = MockSongCatalogCommand::new();
    command
        .expect_create()
        .withf(|request| request.group == "Muse" && request.title.is_empty())
        .times(1)
        .return_once(|_| Err(Error::invalid_request("missing required fields: group or song")));

    let (status, body) = call(
        with_command(command),
        actix_test::TestRequest::post()
            .uri("/api/songs")
            .set_json(json!({"group": "Muse"})),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "missing required fields: group or song");
}

#[rstest]
#[actix_web::test]
async fn malformed_body_is_rejected_with_catalogue_error_shape() {
    let mut command = MockSongCatalogCommand::new();
    command.expect_create().never();

    let (status, body) = call(
        with_command(command),
        actix_test::TestRequest::post()
            .uri("/api/songs")
            .insert_header(("content-type", "application/json"))
            .set_payload("{\"group\": 42"),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "invalid_request");
    assert_eq!(body["message"], INVALID_BODY_MESSAGE);
}

#[rstest]
#[actix_web::test]
async fn add_song_surfaces_enrichment_failure() {
    let mut command = MockSongCatalogCommand::new();
    command
        .expect_create()
        .return_once(|_| Err(Error::enrichment_failed("failed to fetch song details")));

    let (status, body) = call(
        with_command(command),
        actix_test::TestRequest::post()
            .uri("/api/songs")
            .set_json(json!({"group": "Muse", "song": "Uprising"})),
    )
    .await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["code"], "enrichment_failed");
}

#[rstest]
#[actix_web::test]
async fn list_songs_translates_filters_and_paging() {
    let mut query = MockSongCatalogQuery::new();
    query
        .expect_list_songs()
        .withf(|q| {
            q.group.as_deref() == Some("muse")
                && q.title.is_none()
                && q.release_date == NaiveDate::from_ymd_opt(2006, 7, 16)
                && q.page.page() == 2
                && q.page.limit() == 5
        })
        .times(1)
        .return_once(|_| Ok(vec![sample_song()]));

    let (status, body) = call(
        with_query(query),
        actix_test::TestRequest::get()
            .uri("/api/songs?group=muse&title=&releaseDate=2006-07-16&page=2&limit=5"),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        json!([{
            "id": "song-1",
            "group": "Muse",
            "title": "Supermassive Black Hole",
            "releaseDate": "2006-07-16",
            "text": "Ooh baby\n\nI thought I was a fool",
            "link": "https://www.youtube.com/watch?v=Xsp3_a-PMTw",
        }])
    );
}

#[rstest]
#[actix_web::test]
async fn list_songs_defaults_non_numeric_paging() {
    let mut query = MockSongCatalogQuery::new();
    query
        .expect_list_songs()
        .withf(|q| q.page == PageRequest::default())
        .times(1)
        .return_once(|_| Ok(Vec::new()));

    let (status, body) = call(
        with_query(query),
        actix_test::TestRequest::get().uri("/api/songs?page=abc&limit=ten"),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!([]));
}

#[rstest]
#[case("/api/songs?releaseDate=16.07.2006", "invalid releaseDate format")]
#[case("/api/songs?page=0", "page must be at least 1, got 0")]
#[case("/api/songs?limit=-3", "limit must be at least 1, got -3")]
#[actix_web::test]
async fn list_songs_rejects_invalid_parameters(#[case] uri: &str, #[case] message: &str) {
    let mut query = MockSongCatalogQuery::new();
    query.expect_list_songs().never();

    let (status, body) = call(with_query(query), actix_test::TestRequest::get().uri(uri)).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "invalid_request");
    assert_eq!(body["message"], message);
}

#[rstest]
#[case("/api/songs?page=1&page=2")]
#[case("/api/songs?group=muse&group=queen")]
#[case("/api/songs/song-1/lyrics?limit=1&limit=2")]
#[actix_web::test]
async fn duplicated_query_keys_get_structured_errors(#[case] uri: &str) {
    let mut query = MockSongCatalogQuery::new();
    query.expect_list_songs().never();
    query.expect_lyrics().never();

    let (status, body) = call(with_query(query), actix_test::TestRequest::get().uri(uri)).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "invalid_request");
    assert_eq!(body["message"], INVALID_QUERY_MESSAGE);
    assert_eq!(body["details"], json!({"code": "invalid_query"}));
}

#[rstest]
#[actix_web::test]
async fn list_songs_accepts_limits_beyond_u32() {
    let mut query = MockSongCatalogQuery::new();
    query
        .expect_list_songs()
        .withf(|q| q.page.page() == 1 && q.page.limit() == 5_000_000_000)
        .times(1)
        .return_once(|_| Ok(vec![sample_song()]));

    let (status, body) = call(
        with_query(query),
        actix_test::TestRequest::get().uri("/api/songs?limit=5000000000"),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body.as_array().map(Vec::len), Some(1));
}

#[rstest]
#[actix_web::test]
async fn storage_failures_are_redacted() {
    let failure = Error::persistence_failed("failed to list songs: relation missing");
    let mut query = MockSongCatalogQuery::new();
    query
        .expect_list_songs()
        .return_once(move |_| Err(failure));

    let (status, body) = call(
        with_query(query),
        actix_test::TestRequest::get().uri("/api/songs"),
    )
    .await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["code"], "persistence_failed");
    assert_eq!(body["message"], "Internal server error");
}

#[rstest]
#[actix_web::test]
async fn lyrics_returns_requested_page() {
    let mut query = MockSongCatalogQuery::new();
    query
        .expect_lyrics()
        .withf(|q| q.song_id.as_str() == "song-1" && q.page.page() == 2 && q.page.limit() == 1)
        .times(1)
        .return_once(|_| Ok("B".to_owned()));

    let (status, body) = call(
        with_query(query),
        actix_test::TestRequest::get().uri("/api/songs/song-1/lyrics?page=2&limit=1"),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"lyrics": "B"}));
}

#[rstest]
#[actix_web::test]
async fn lyrics_for_unknown_song_is_not_found() {
    let (status, body) = call(
        HttpState::default(),
        actix_test::TestRequest::get().uri("/api/songs/missing/lyrics"),
    )
    .await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["code"], "not_found");
    assert_eq!(body["message"], "song with id missing not found");
}

#[rstest]
#[actix_web::test]
async fn update_song_sends_only_supplied_fields() {
    let mut command = MockSongCatalogCommand::new();
    command
        .expect_update()
        .with(
            eq(SongId::new("song-1")),
            eq(SongPatch {
                release_date: NaiveDate::from_ymd_opt(2006, 7, 16),
                link: Some("https://example.test/watch".to_owned()),
                ..SongPatch::default()
            }),
        )
        .times(1)
        .return_once(|_, _| Ok(()));

    let (status, body) = call(
        with_command(command),
        actix_test::TestRequest::put().uri("/api/songs/song-1").set_json(json!({
            "group": "",
            "releaseDate": "2006-07-16",
            "link": "https://example.test/watch",
        })),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"status": "ok"}));
}

#[rstest]
#[actix_web::test]
async fn update_song_rejects_malformed_date() {
    let mut command = MockSongCatalogCommand::new();
    command.expect_update().never();

    let (status, body) = call(
        with_command(command),
        actix_test::TestRequest::put()
            .uri("/api/songs/song-1")
            .set_json(json!({"releaseDate": "16.07.2006"})),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "invalid date format, try yyyy-mm-dd");
    assert_eq!(body["details"]["field"], "releaseDate");
}

#[rstest]
#[case(Ok(()), StatusCode::OK)]
#[case(Err(Error::not_found("song with id song-1 not found")), StatusCode::NOT_FOUND)]
#[actix_web::test]
async fn delete_song_maps_outcomes(
    #[case] outcome: Result<(), Error>,
    #[case] expected: StatusCode,
) {
    let mut command = MockSongCatalogCommand::new();
    command
        .expect_delete()
        .with(eq(SongId::new("song-1")))
        .times(1)
        .return_once(move |_| outcome);

    let (status, _) = call(
        with_command(command),
        actix_test::TestRequest::delete().uri("/api/songs/song-1"),
    )
    .await;

    assert_eq!(status, expected);
}
