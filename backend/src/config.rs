//! Service configuration loaded via OrthoConfig.
//!
//! Values come from `SONGBOOK_*` environment variables, an optional
//! configuration file and command-line flags, in increasing precedence.

use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::time::Duration;

use ortho_config::OrthoConfig;
use serde::Deserialize;
use tracing::level_filters::LevelFilter;
use url::Url;

use crate::outbound::persistence::{ConnectRetry, PoolConfig};

const DEFAULT_PORT: u16 = 8080;
const DEFAULT_HOST: IpAddr = IpAddr::V4(Ipv4Addr::UNSPECIFIED);
const DEFAULT_DETAILS_TIMEOUT_SECS: u64 = 10;
const DEFAULT_LOG_LEVEL: &str = "info";
const DEFAULT_CONNECT_ATTEMPTS: u32 = 10;
const DEFAULT_CONNECT_RETRY_SECS: u64 = 5;
const DEFAULT_MAX_CONNECTIONS: u32 = 10;

/// Errors raised while resolving settings into runtime values.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum SettingsError {
    /// A required value was not supplied.
    #[error("missing required setting {key}")]
    Missing {
        /// Environment variable that must be set.
        key: &'static str,
    },
    /// The log level is not one of `off`, `error`, `warn`, `info`, `debug`
    /// or `trace`.
    #[error("invalid log level {value:?}")]
    InvalidLogLevel {
        /// Rejected value.
        value: String,
    },
    /// The details provider URL could not be parsed.
    #[error("invalid details provider URL {value:?}: {message}")]
    InvalidDetailsUrl {
        /// Rejected value.
        value: String,
        /// Parser message.
        message: String,
    },
}

/// Runtime settings for the songbook service.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "SONGBOOK")]
pub struct SongbookSettings {
    /// Port the HTTP server listens on.
    pub server_port: Option<u16>,
    /// Address the HTTP server binds to.
    pub server_host: Option<IpAddr>,
    /// PostgreSQL connection URL.
    pub database_url: Option<String>,
    /// Base URL of the song details provider.
    pub details_api_url: Option<String>,
    /// Seconds before a details lookup is abandoned.
    pub details_timeout_secs: Option<u64>,
    /// Fallback log filter when `RUST_LOG` is unset.
    pub log_level: Option<String>,
    /// Startup attempts to reach the database.
    pub db_connect_attempts: Option<u32>,
    /// Seconds between database connection attempts.
    pub db_connect_retry_secs: Option<u64>,
    /// Maximum pooled database connections.
    pub db_max_connections: Option<u32>,
}

impl SongbookSettings {
    /// Socket address the server binds to.
    pub fn bind_addr(&self) -> SocketAddr {
        SocketAddr::new(
            self.server_host.unwrap_or(DEFAULT_HOST),
            self.server_port.unwrap_or(DEFAULT_PORT),
        )
    }

    /// Database URL, which must be configured.
    ///
    /// # Errors
    /// Returns [`SettingsError::Missing`] when unset or blank.
    pub fn database_url(&self) -> Result<&str, SettingsError> {
        self.database_url
            .as_deref()
            .filter(|value| !value.trim().is_empty())
            .ok_or(SettingsError::Missing {
                key: "SONGBOOK_DATABASE_URL",
            })
    }

    /// Parsed details provider base URL, which must be configured.
    ///
    /// # Errors
    /// Returns [`SettingsError`] when unset or unparseable.
    pub fn details_api_url(&self) -> Result<Url, SettingsError> {
        let raw = self
            .details_api_url
            .as_deref()
            .filter(|value| !value.trim().is_empty())
            .ok_or(SettingsError::Missing {
                key: "SONGBOOK_DETAILS_API_URL",
            })?;
        Url::parse(raw).map_err(|err| SettingsError::InvalidDetailsUrl {
            value: raw.to_owned(),
            message: err.to_string(),
        })
    }

    /// Timeout applied to each details lookup.
    pub fn details_timeout(&self) -> Duration {
        Duration::from_secs(
            self.details_timeout_secs
                .unwrap_or(DEFAULT_DETAILS_TIMEOUT_SECS),
        )
    }

    /// Log level used when `RUST_LOG` is absent.
    ///
    /// # Errors
    /// Returns [`SettingsError::InvalidLogLevel`] when the value is not a
    /// level name; callers fall back to `info`.
    pub fn log_level(&self) -> Result<LevelFilter, SettingsError> {
        let raw = self.log_level.as_deref().unwrap_or(DEFAULT_LOG_LEVEL);
        raw.trim()
            .parse::<LevelFilter>()
            .map_err(|_| SettingsError::InvalidLogLevel {
                value: raw.to_owned(),
            })
    }

    /// Retry policy for reaching the database at startup.
    pub fn connect_retry(&self) -> ConnectRetry {
        ConnectRetry {
            attempts: self.db_connect_attempts.unwrap_or(DEFAULT_CONNECT_ATTEMPTS),
            delay: Duration::from_secs(
                self.db_connect_retry_secs
                    .unwrap_or(DEFAULT_CONNECT_RETRY_SECS),
            ),
        }
    }

    /// Connection pool configuration.
    ///
    /// # Errors
    /// Returns [`SettingsError::Missing`] when no database URL is configured.
    pub fn pool_config(&self) -> Result<PoolConfig, SettingsError> {
        Ok(PoolConfig::new(self.database_url()?)
            .with_max_size(self.db_max_connections.unwrap_or(DEFAULT_MAX_CONNECTIONS)))
    }
}

#[cfg(test)]
mod tests {
    //! Unit tests for settings parsing and defaults.

    use super::*;
    use std::ffi::OsString;

    use env_lock::lock_env;
    use rstest::rstest;

    const KEYS: [&str; 9] = [
        "SONGBOOK_SERVER_PORT",
        "SONGBOOK_SERVER_HOST",
        "SONGBOOK_DATABASE_URL",
        "SONGBOOK_DETAILS_API_URL",
        "SONGBOOK_DETAILS_TIMEOUT_SECS",
        "SONGBOOK_LOG_LEVEL",
        "SONGBOOK_DB_CONNECT_ATTEMPTS",
        "SONGBOOK_DB_CONNECT_RETRY_SECS",
        "SONGBOOK_DB_MAX_CONNECTIONS",
    ];

    fn env_with(overrides: &[(&'static str, &str)]) -> Vec<(&'static str, Option<String>)> {
        KEYS.iter()
            .map(|key| {
                let value = overrides
                    .iter()
                    .find(|(name, _)| name == key)
                    .map(|(_, value)| (*value).to_owned());
                (*key, value)
            })
            .collect()
    }

    fn load_from_empty_args() -> SongbookSettings {
        SongbookSettings::load_from_iter([OsString::from("songbook")])
            .expect("config should load")
    }

    #[rstest]
    fn default_values_are_used_when_missing() {
        let _guard = lock_env(env_with(&[]));

        let settings = load_from_empty_args();
        assert_eq!(settings.bind_addr(), "0.0.0.0:8080".parse().expect("addr"));
        assert_eq!(settings.details_timeout(), Duration::from_secs(10));
        assert_eq!(settings.log_level(), Ok(LevelFilter::INFO));
        assert_eq!(settings.connect_retry(), ConnectRetry::default());
        assert_eq!(
            settings.database_url(),
            Err(SettingsError::Missing {
                key: "SONGBOOK_DATABASE_URL"
            })
        );
        assert!(matches!(
            settings.details_api_url(),
            Err(SettingsError::Missing { .. })
        ));
    }

    #[rstest]
    fn environment_overrides_are_respected() {
        let _guard = lock_env(env_with(&[
            ("SONGBOOK_SERVER_PORT", "9090"),
            ("SONGBOOK_SERVER_HOST", "127.0.0.1"),
            ("SONGBOOK_DATABASE_URL", "postgres://songbook@db/songbook"),
            ("SONGBOOK_DETAILS_API_URL", "http://provider.test/v1/"),
            ("SONGBOOK_DETAILS_TIMEOUT_SECS", "3"),
            ("SONGBOOK_LOG_LEVEL", "debug"),
            ("SONGBOOK_DB_CONNECT_ATTEMPTS", "2"),
            ("SONGBOOK_DB_CONNECT_RETRY_SECS", "1"),
            ("SONGBOOK_DB_MAX_CONNECTIONS", "4"),
        ]));

        let settings = load_from_empty_args();
        assert_eq!(settings.bind_addr(), "127.0.0.1:9090".parse().expect("addr"));
        assert_eq!(
            settings.database_url(),
            Ok("postgres://songbook@db/songbook")
        );
        assert_eq!(
            settings.details_api_url().expect("url").as_str(),
            "http://provider.test/v1/"
        );
        assert_eq!(settings.details_timeout(), Duration::from_secs(3));
        assert_eq!(settings.log_level(), Ok(LevelFilter::DEBUG));
        assert_eq!(
            settings.connect_retry(),
            ConnectRetry {
                attempts: 2,
                delay: Duration::from_secs(1),
            }
        );
        assert_eq!(settings.pool_config().expect("pool config").max_size(), 4);
    }

    #[rstest]
    #[case("verbose")]
    #[case("infoo")]
    #[case("songbook=debug")]
    fn unknown_log_levels_are_rejected(#[case] level: &str) {
        let _guard = lock_env(env_with(&[("SONGBOOK_LOG_LEVEL", level)]));

        let settings = load_from_empty_args();
        assert_eq!(
            settings.log_level(),
            Err(SettingsError::InvalidLogLevel {
                value: level.to_owned()
            })
        );
    }

    #[rstest]
    #[case("warn", LevelFilter::WARN)]
    #[case("off", LevelFilter::OFF)]
    #[case("trace", LevelFilter::TRACE)]
    fn level_names_are_accepted(#[case] level: &str, #[case] expected: LevelFilter) {
        let _guard = lock_env(env_with(&[("SONGBOOK_LOG_LEVEL", level)]));

        assert_eq!(load_from_empty_args().log_level(), Ok(expected));
    }

    #[rstest]
    fn unparseable_details_url_is_reported() {
        let _guard = lock_env(env_with(&[("SONGBOOK_DETAILS_API_URL", "not a url")]));

        let settings = load_from_empty_args();
        assert!(matches!(
            settings.details_api_url(),
            Err(SettingsError::InvalidDetailsUrl { .. })
        ));
    }
}
