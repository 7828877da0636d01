//! Diesel table definitions for the PostgreSQL schema.
//!
//! These definitions must match `backend/migrations` exactly.

diesel::table! {
    /// Catalogued songs.
    ///
    /// `id` is the service-generated UUID v4 text; the remaining columns hold
    /// the client-supplied group/title and the provider-supplied details.
    songs (id) {
        /// Primary key: UUID v4 text.
        id -> Varchar,
        /// Performing group or artist.
        group_name -> Varchar,
        /// Song title.
        title -> Varchar,
        /// Release date.
        release_date -> Date,
        /// Full lyrics with blank-line separated couplets.
        text -> Text,
        /// External link.
        link -> Text,
    }
}
