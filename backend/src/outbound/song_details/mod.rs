//! Song details provider outbound adapters.
//!
//! This module provides a thin HTTP implementation of the
//! `SongDetailsSource` port.

mod dto;
mod http_source;

pub use http_source::{SongDetailsHttpSource, SongDetailsHttpSourceError};
