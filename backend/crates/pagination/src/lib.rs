//! Page-number pagination primitives.
//!
//! Endpoints that page through rows or through segments of a single document
//! share the same `page`/`limit` contract: pages are one-based, limits are
//! positive, and missing values fall back to [`DEFAULT_PAGE`] and
//! [`DEFAULT_LIMIT`]. [`PageRequest`] owns that contract and converts it into
//! either a row offset for SQL or an index window over an in-memory sequence.

mod page;

pub use page::{DEFAULT_LIMIT, DEFAULT_PAGE, PageError, PageRequest};
