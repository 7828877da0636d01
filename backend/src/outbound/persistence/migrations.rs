//! Embedded schema migrations and startup connection retry.
//!
//! Migrations are compiled into the binary from `backend/migrations` and run
//! over a short-lived synchronous connection before the async pool is built.

use std::future::Future;
use std::time::Duration;

use diesel::{Connection, PgConnection};
use diesel_migrations::{EmbeddedMigrations, MigrationHarness, embed_migrations};
use tracing::{info, warn};

const MIGRATIONS: EmbeddedMigrations = embed_migrations!("migrations");

/// Errors raised while preparing the database schema.
#[derive(Debug, thiserror::Error)]
pub enum MigrationError {
    /// Could not open a connection for migrations.
    #[error("failed to connect for migrations: {0}")]
    Connect(#[from] diesel::ConnectionError),
    /// A migration failed to apply.
    #[error("failed to apply migrations: {message}")]
    Apply {
        /// Harness error text.
        message: String,
    },
    /// The blocking migration task panicked or was cancelled.
    #[error("migration task did not complete: {message}")]
    Task {
        /// Join error text.
        message: String,
    },
}

/// Apply all pending migrations, returning how many ran.
///
/// Blocks the calling thread; use [`run_migrations_blocking`] from async code.
///
/// # Errors
/// Returns [`MigrationError`] when the connection or a migration fails.
pub fn run_migrations(database_url: &str) -> Result<usize, MigrationError> {
    let mut connection = PgConnection::establish(database_url)?;
    let applied = connection
        .run_pending_migrations(MIGRATIONS)
        .map_err(|err| MigrationError::Apply {
            message: err.to_string(),
        })?;
    Ok(applied.len())
}

/// Run [`run_migrations`] on the blocking thread pool.
///
/// # Errors
/// Propagates [`run_migrations`] failures and reports task join failures.
pub async fn run_migrations_blocking(database_url: String) -> Result<usize, MigrationError> {
    tokio::task::spawn_blocking(move || run_migrations(&database_url))
        .await
        .map_err(|err| MigrationError::Task {
            message: err.to_string(),
        })?
}

/// Retry policy for reaching the database at startup.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConnectRetry {
    /// Total attempts, including the first.
    pub attempts: u32,
    /// Pause between attempts.
    pub delay: Duration,
}

impl Default for ConnectRetry {
    fn default() -> Self {
        Self {
            attempts: 10,
            delay: Duration::from_secs(5),
        }
    }
}

impl ConnectRetry {
    /// Run `operation` until it succeeds or the attempts are used up.
    ///
    /// # Errors
    /// Returns the error of the final attempt.
    pub async fn run<T, E, F, Fut>(&self, what: &str, mut operation: F) -> Result<T, E>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = Result<T, E>>,
        E: std::fmt::Display,
    {
        let attempts = self.attempts.max(1);
        let mut attempt = 1;
        loop {
            match operation().await {
                Ok(value) => {
                    if attempt > 1 {
                        info!(what, attempt, "database became reachable");
                    }
                    return Ok(value);
                }
                Err(error) if attempt < attempts => {
                    warn!(what, attempt, attempts, %error, "database not ready, retrying");
                    tokio::time::sleep(self.delay).await;
                    attempt += 1;
                }
                Err(error) => return Err(error),
            }
        }
    }
}
