//! Store connection settings.
//!
//! Settings deserialize from any serde source and can be read from the
//! process environment:
//!
//! - `PROJECTDESK_DATABASE_URL`: `PostgreSQL` connection URL (required)
//! - `PROJECTDESK_DB_MAX_CONNECTIONS`: pool size (default 10)
//! - `PROJECTDESK_DB_CONNECT_TIMEOUT_SECS`: connection timeout in seconds
//!   (default 30)

use serde::{Deserialize, Deserializer};
use std::time::Duration;
use thiserror::Error;

/// Variable holding the database URL.
pub const DATABASE_URL_VAR: &str = "PROJECTDESK_DATABASE_URL";
/// Variable holding the maximum pool size.
pub const MAX_CONNECTIONS_VAR: &str = "PROJECTDESK_DB_MAX_CONNECTIONS";
/// Variable holding the connection timeout in seconds.
pub const CONNECT_TIMEOUT_VAR: &str = "PROJECTDESK_DB_CONNECT_TIMEOUT_SECS";

const DEFAULT_MAX_CONNECTIONS: u32 = 10;
const DEFAULT_CONNECT_TIMEOUT_SECS: u64 = 30;

/// Errors raised while loading store settings.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// A required variable is absent or blank.
    #[error("missing required setting {0}")]
    Missing(&'static str),

    /// A setting holds a value that does not parse.
    #[error("invalid value {value:?} for {name}")]
    Invalid {
        /// Variable name.
        name: &'static str,
        /// Raw value that failed to parse.
        value: String,
    },

    /// The pool size and connection timeout must be positive.
    #[error("{0} must be greater than zero")]
    Zero(&'static str),
}

/// Connection settings for the relational store.
///
/// Pool size and connection timeout are always positive.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(try_from = "RawStoreSettings")]
pub struct StoreSettings {
    database_url: String,
    max_connections: u32,
    connection_timeout: Duration,
}

#[derive(Deserialize)]
struct RawStoreSettings {
    database_url: String,
    #[serde(default = "default_max_connections")]
    max_connections: u32,
    #[serde(
        default = "default_connection_timeout",
        rename = "connection_timeout_secs",
        deserialize_with = "seconds"
    )]
    connection_timeout: Duration,
}

impl TryFrom<RawStoreSettings> for StoreSettings {
    type Error = ConfigError;

    fn try_from(raw: RawStoreSettings) -> Result<Self, Self::Error> {
        let settings = Self {
            database_url: raw.database_url,
            max_connections: raw.max_connections,
            connection_timeout: raw.connection_timeout,
        };
        settings.validate()?;
        Ok(settings)
    }
}

impl StoreSettings {
    /// Creates settings for `database_url` with default pool parameters.
    #[must_use]
    pub fn new(database_url: impl Into<String>) -> Self {
        Self {
            database_url: database_url.into(),
            max_connections: DEFAULT_MAX_CONNECTIONS,
            connection_timeout: default_connection_timeout(),
        }
    }

    /// Overrides the maximum pool size.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Zero`] when `max_connections` is zero.
    pub fn with_max_connections(mut self, max_connections: u32) -> Result<Self, ConfigError> {
        self.max_connections = max_connections;
        self.validate()?;
        Ok(self)
    }

    /// Overrides the connection timeout.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Zero`] when `timeout` is zero.
    pub fn with_connection_timeout(mut self, timeout: Duration) -> Result<Self, ConfigError> {
        self.connection_timeout = timeout;
        self.validate()?;
        Ok(self)
    }

    /// Checks that the pool size and connection timeout are positive.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Zero`] naming the first zero-valued setting.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_connections == 0 {
            return Err(ConfigError::Zero("max_connections"));
        }
        if self.connection_timeout.is_zero() {
            return Err(ConfigError::Zero("connection_timeout"));
        }
        Ok(())
    }

    /// Reads settings from the process environment.
    ///
    /// # Errors
    ///
    /// See [`StoreSettings::from_lookup`].
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Reads settings through `lookup`, which maps a variable name to its
    /// value.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Missing`] when the database URL is absent,
    /// [`ConfigError::Invalid`] when a numeric variable does not parse, and
    /// [`ConfigError::Zero`] for an empty pool or a zero timeout.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let database_url = lookup(DATABASE_URL_VAR)
            .map(|value| value.trim().to_owned())
            .filter(|value| !value.is_empty())
            .ok_or(ConfigError::Missing(DATABASE_URL_VAR))?;
        let max_connections =
            parse_or(&lookup, MAX_CONNECTIONS_VAR, DEFAULT_MAX_CONNECTIONS)?;
        if max_connections == 0 {
            return Err(ConfigError::Zero(MAX_CONNECTIONS_VAR));
        }
        let timeout_secs = parse_or(&lookup, CONNECT_TIMEOUT_VAR, DEFAULT_CONNECT_TIMEOUT_SECS)?;
        if timeout_secs == 0 {
            return Err(ConfigError::Zero(CONNECT_TIMEOUT_VAR));
        }

        Ok(Self {
            database_url,
            max_connections,
            connection_timeout: Duration::from_secs(timeout_secs),
        })
    }

    /// Returns the database URL.
    #[must_use]
    pub fn database_url(&self) -> &str {
        &self.database_url
    }

    /// Returns the maximum pool size.
    #[must_use]
    pub const fn max_connections(&self) -> u32 {
        self.max_connections
    }

    /// Returns the connection timeout.
    #[must_use]
    pub const fn connection_timeout(&self) -> Duration {
        self.connection_timeout
    }
}

fn parse_or<F, T>(lookup: &F, name: &'static str, default: T) -> Result<T, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: std::str::FromStr,
{
    let Some(raw) = lookup(name) else {
        return Ok(default);
    };
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Ok(default);
    }
    trimmed.parse().map_err(|_| ConfigError::Invalid {
        name,
        value: raw.clone(),
    })
}

const fn default_max_connections() -> u32 {
    DEFAULT_MAX_CONNECTIONS
}

const fn default_connection_timeout() -> Duration {
    Duration::from_secs(DEFAULT_CONNECT_TIMEOUT_SECS)
}

fn seconds<'de, D>(deserializer: D) -> Result<Duration, D::Error>
where
    D: Deserializer<'de>,
{
    u64::deserialize(deserializer).map(Duration::from_secs)
}
