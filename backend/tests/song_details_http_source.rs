//! `SongDetailsHttpSource` against a local stand-in for the details provider.

use std::collections::HashMap;
use std::time::Duration;

use actix_web::{App, HttpResponse, HttpServer, web};
use rstest::rstest;
use url::Url;

use songbook::domain::ports::{SongDetailsRequest, SongDetailsSource, SongDetailsSourceError};
use songbook::outbound::song_details::SongDetailsHttpSource;

async fn info(query: web::Query<HashMap<String, String>>) -> HttpResponse {
    let group = query.get("group").cloned().unwrap_or_default();
    let song = query.get("song").cloned().unwrap_or_default();
    match group.as_str() {
        "Missing" => HttpResponse::NotFound().body("no such song"),
        "Garbage" => HttpResponse::Ok()
            .content_type("text/html")
            .body("<html>maintenance</html>"),
        "Slow" => {
            tokio::time::sleep(Duration::from_secs(2)).await;
            HttpResponse::Ok().json(serde_json::json!({}))
        }
        _ => HttpResponse::Ok().json(serde_json::json!({
            "releaseDate": "16.07.2006",
            "text": format!("{song} by {group}"),
            "link": "https://www.youtube.com/watch?v=Xsp3_a-PMTw",
        })),
    }
}

/// Start the stand-in provider and return its base URL.
fn start_provider(prefix: &'static str) -> Url {
    let server = HttpServer::new(move || {
        App::new().service(web::scope(prefix).route("/info", web::get().to(info)))
    })
    .workers(1)
    .bind(("127.0.0.1", 0))
    .expect("bind provider");
    let addr = server.addrs().first().copied().expect("bound address");
    actix_web::rt::spawn(server.run());
    Url::parse(&format!("http://{addr}{prefix}/")).expect("provider url")
}

fn request(group: &str, title: &str) -> SongDetailsRequest {
    SongDetailsRequest {
        group: group.to_owned(),
        title: title.to_owned(),
    }
}

fn source(base: Url, timeout: Duration) -> SongDetailsHttpSource {
    SongDetailsHttpSource::new(base, timeout).expect("client builds")
}

#[rstest]
#[actix_web::test]
async fn fetches_and_decodes_details() {
    let base = start_provider("/v1");
    let details = source(base, Duration::from_secs(5))
        .fetch_details(&request("Muse", "Supermassive Black Hole & more"))
        .await
        .expect("details");

    assert_eq!(details.release_date, "16.07.2006");
    assert_eq!(details.text, "Supermassive Black Hole & more by Muse");
    assert_eq!(details.link, "https://www.youtube.com/watch?v=Xsp3_a-PMTw");
}

#[rstest]
#[actix_web::test]
async fn non_success_status_is_reported_with_code() {
    let base = start_provider("/v1");
    let error = source(base, Duration::from_secs(5))
        .fetch_details(&request("Missing", "Anything"))
        .await
        .expect_err("404 is a failure");

    assert_eq!(
        error,
        SongDetailsSourceError::status(404_u16, "no such song")
    );
}

#[rstest]
#[actix_web::test]
async fn undecodable_body_is_a_decode_error() {
    let base = start_provider("/v1");
    let error = source(base, Duration::from_secs(5))
        .fetch_details(&request("Garbage", "Anything"))
        .await
        .expect_err("html is not details");

    assert!(matches!(error, SongDetailsSourceError::Decode { .. }));
}

#[rstest]
#[actix_web::test]
async fn slow_provider_times_out() {
    let base = start_provider("/v1");
    let error = source(base, Duration::from_millis(200))
        .fetch_details(&request("Slow", "Anything"))
        .await
        .expect_err("lookup times out");

    assert!(matches!(error, SongDetailsSourceError::Timeout { .. }));
}

#[rstest]
#[actix_web::test]
async fn unreachable_provider_is_a_transport_error() {
    let base = Url::parse("http://127.0.0.1:9/").expect("url");
    let error = source(base, Duration::from_secs(2))
        .fetch_details(&request("Muse", "Uprising"))
        .await
        .expect_err("nothing listens on the discard port");

    assert!(matches!(
        error,
        SongDetailsSourceError::Transport { .. } | SongDetailsSourceError::Timeout { .. }
    ));
}
