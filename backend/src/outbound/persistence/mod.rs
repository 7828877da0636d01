//! PostgreSQL persistence adapters using Diesel ORM.
//!
//! Repository implementations only translate between Diesel rows and port
//! records; no catalogue rules live here. Rows (`models.rs`) and the table
//! definition (`schema.rs`) stay private to this module.
//!
//! # Example
//!
//! ```ignore
//! use songbook::outbound::persistence::{DbPool, DieselSongRepository, PoolConfig};
//!
//! let pool = DbPool::new(PoolConfig::new("postgres://localhost/songbook")).await?;
//! let repo = DieselSongRepository::new(pool);
//! ```

mod diesel_song_repository;
mod migrations;
mod models;
mod pool;
mod schema;

pub use diesel_song_repository::DieselSongRepository;
pub use migrations::{ConnectRetry, MigrationError, run_migrations, run_migrations_blocking};
pub use pool::{DbPool, PoolConfig, PoolError};
