//! Reqwest-backed details provider adapter.
//!
//! This adapter owns transport details only: URL construction, timeout and
//! HTTP error mapping, and JSON decoding into [`SongDetails`].

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, StatusCode, Url};
use tracing::debug;

use super::dto::SongDetailsDto;
use crate::domain::ports::{
    SongDetails, SongDetailsRequest, SongDetailsSource, SongDetailsSourceError,
};

/// Path segment of the provider lookup endpoint.
const INFO_PATH: &str = "info";

/// Errors raised while constructing [`SongDetailsHttpSource`].
#[derive(Debug, thiserror::Error)]
pub enum SongDetailsHttpSourceError {
    /// The base URL cannot carry path segments (for example `mailto:`).
    #[error("details provider base URL cannot be a base: {url}")]
    InvalidBaseUrl {
        /// Rejected URL.
        url: String,
    },
    /// The reqwest client could not be built.
    #[error("failed to build details provider client: {0}")]
    Client(#[from] reqwest::Error),
}

/// Details source performing one HTTP GET per lookup.
#[derive(Debug, Clone)]
pub struct SongDetailsHttpSource {
    client: Client,
    endpoint: Url,
}

impl SongDetailsHttpSource {
    /// Build an adapter for the provider rooted at `base_url`.
    ///
    /// Lookups go to `<base_url>/info` and are abandoned after `timeout`.
    ///
    /// # Errors
    /// Returns an error when `base_url` cannot hold a path or the reqwest
    /// client cannot be constructed.
    pub fn new(base_url: Url, timeout: Duration) -> Result<Self, SongDetailsHttpSourceError> {
        let endpoint = info_endpoint(base_url)?;
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self { client, endpoint })
    }

    fn lookup_url(&self, request: &SongDetailsRequest) -> Url {
        let mut url = self.endpoint.clone();
        url.query_pairs_mut()
            .append_pair("group", &request.group)
            .append_pair("song", &request.title);
        url
    }
}

fn info_endpoint(base_url: Url) -> Result<Url, SongDetailsHttpSourceError> {
    if base_url.cannot_be_a_base() {
        return Err(SongDetailsHttpSourceError::InvalidBaseUrl {
            url: base_url.to_string(),
        });
    }
    let mut endpoint = base_url;
    endpoint.set_query(None);
    if let Ok(mut segments) = endpoint.path_segments_mut() {
        segments.pop_if_empty().push(INFO_PATH);
    }
    Ok(endpoint)
}

#[async_trait]
impl SongDetailsSource for SongDetailsHttpSource {
    async fn fetch_details(
        &self,
        request: &SongDetailsRequest,
    ) -> Result<SongDetails, SongDetailsSourceError> {
        let url = self.lookup_url(request);
        debug!(%url, "fetching song details");

        let response = self
            .client
            .get(url)
            .header(reqwest::header::ACCEPT, "application/json")
            .send()
            .await
            .map_err(map_transport_error)?;

        let status = response.status();
        let body = response.bytes().await.map_err(map_transport_error)?;
        if !status.is_success() {
            return Err(map_status_error(status, body.as_ref()));
        }

        parse_details(body.as_ref())
    }
}

fn parse_details(body: &[u8]) -> Result<SongDetails, SongDetailsSourceError> {
    serde_json::from_slice::<SongDetailsDto>(body)
        .map(SongDetails::from)
        .map_err(|error| SongDetailsSourceError::decode(error.to_string()))
}

fn map_transport_error(error: reqwest::Error) -> SongDetailsSourceError {
    if error.is_timeout() {
        SongDetailsSourceError::timeout(error.to_string())
    } else {
        SongDetailsSourceError::transport(error.to_string())
    }
}

fn map_status_error(status: StatusCode, body: &[u8]) -> SongDetailsSourceError {
    let preview = body_preview(body);
    let message = if preview.is_empty() {
        "empty body".to_owned()
    } else {
        preview
    };
    SongDetailsSourceError::status(status.as_u16(), message)
}

fn body_preview(body: &[u8]) -> String {
    const PREVIEW_CHAR_LIMIT: usize = 120;

    let compact = String::from_utf8_lossy(body)
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ");
    if compact.chars().count() > PREVIEW_CHAR_LIMIT {
        let preview: String = compact.chars().take(PREVIEW_CHAR_LIMIT).collect();
        format!("{preview}...")
    } else {
        compact
    }
}
