//! Song catalogue service library.
//!
//! Hexagonal layout: `domain` holds the catalogue rules and ports, `inbound`
//! exposes them over HTTP and `outbound` implements the ports against
//! PostgreSQL and the song details provider.

pub mod config;
pub mod doc;
pub mod domain;
pub mod inbound;
pub mod middleware;
pub mod outbound;

/// Public OpenAPI surface used by Swagger UI and tooling.
pub use doc::ApiDoc;
pub use domain::TraceId;
pub use middleware::Trace;
