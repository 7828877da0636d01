//! Driven port for the external song details provider.
//!
//! New songs carry only a group and title; the provider supplies the release
//! date, lyrics and link. The port returns the provider's payload untouched
//! (including its `dd.mm.yyyy` date text) and leaves parsing to the domain.

use async_trait::async_trait;

use super::define_port_error;

/// Lookup key sent to the details provider.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SongDetailsRequest {
    /// Performing group.
    pub group: String,
    /// Song title.
    pub title: String,
}

/// Enrichment payload returned by the details provider.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SongDetails {
    /// Release date as `dd.mm.yyyy` text.
    pub release_date: String,
    /// Full lyrics.
    pub text: String,
    /// External link.
    pub link: String,
}

define_port_error! {
    /// Errors surfaced while calling the details provider.
    pub enum SongDetailsSourceError {
        /// Network transport failed before a response arrived.
        Transport { message: String } => "details provider transport failed: {message}",
        /// The call exceeded its timeout.
        Timeout { message: String } => "details provider timed out: {message}",
        /// The provider answered with a non-success status.
        Status { status: u16, message: String } => "unexpected status code: {status} ({message})",
        /// The response body could not be decoded.
        Decode { message: String } => "failed to decode response: {message}",
    }
}

/// Port for fetching enrichment data for a new song.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SongDetailsSource: Send + Sync {
    /// Look up details for one song. Implementations make a single attempt.
    async fn fetch_details(
        &self,
        request: &SongDetailsRequest,
    ) -> Result<SongDetails, SongDetailsSourceError>;
}

/// Fixture source returning placeholder details for any song.
#[derive(Debug, Clone, Copy, Default)]
pub struct FixtureSongDetailsSource;

#[async_trait]
impl SongDetailsSource for FixtureSongDetailsSource {
    async fn fetch_details(
        &self,
        request: &SongDetailsRequest,
    ) -> Result<SongDetails, SongDetailsSourceError> {
        Ok(SongDetails {
            release_date: "01.01.2000".to_owned(),
            text: format!("{} by {}", request.title, request.group),
            link: String::new(),
        })
    }
}
