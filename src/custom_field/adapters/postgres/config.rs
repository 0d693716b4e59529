//! Connection pool configuration for the `PostgreSQL` adapter.

use super::repository::CustomFieldPgPool;
use diesel::pg::PgConnection;
use diesel::r2d2::{ConnectionManager, Pool};
use std::time::Duration;
use thiserror::Error;

/// Environment variable holding the database URL.
pub const DATABASE_URL_VAR: &str = "DATABASE_URL";
/// Environment variable overriding the maximum pool size.
pub const POOL_SIZE_VAR: &str = "USER_FIELDS_PG_POOL_SIZE";
/// Environment variable overriding the connection timeout, in seconds.
pub const CONNECT_TIMEOUT_VAR: &str = "USER_FIELDS_PG_CONNECT_TIMEOUT_SECS";

const DEFAULT_POOL_SIZE: u32 = 10;
const DEFAULT_CONNECT_TIMEOUT_SECS: u64 = 30;

/// Errors raised while reading configuration or building the pool.
#[derive(Debug, Error)]
pub enum PoolConfigError {
    /// A required variable is unset or empty.
    #[error("missing required setting {0}")]
    Missing(&'static str),

    /// A variable holds a value that cannot be parsed.
    #[error("invalid value '{value}' for {name}")]
    Invalid {
        /// Variable name.
        name: &'static str,
        /// Rejected value.
        value: String,
    },

    /// r2d2 could not establish the pool.
    #[error("failed to build connection pool: {0}")]
    Pool(#[from] diesel::r2d2::PoolError),
}

/// Settings for the custom field connection pool.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PgPoolConfig {
    database_url: String,
    max_size: u32,
    connection_timeout: Duration,
}

impl PgPoolConfig {
    /// Creates a configuration with default pool sizing.
    #[must_use]
    pub fn new(database_url: impl Into<String>) -> Self {
        Self {
            database_url: database_url.into(),
            max_size: DEFAULT_POOL_SIZE,
            connection_timeout: Duration::from_secs(DEFAULT_CONNECT_TIMEOUT_SECS),
        }
    }

    /// Reads the configuration from the process environment.
    ///
    /// # Errors
    ///
    /// Returns [`PoolConfigError::Missing`] when `DATABASE_URL` is unset or
    /// [`PoolConfigError::Invalid`] when an override does not parse.
    pub fn from_env() -> Result<Self, PoolConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Reads the configuration through `lookup`, keyed by variable name.
    ///
    /// # Errors
    ///
    /// See [`PgPoolConfig::from_env`].
    pub fn from_lookup(
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Result<Self, PoolConfigError> {
        let database_url = lookup(DATABASE_URL_VAR)
            .filter(|url| !url.trim().is_empty())
            .ok_or(PoolConfigError::Missing(DATABASE_URL_VAR))?;
        let mut config = Self::new(database_url);

        if let Some(raw) = lookup(POOL_SIZE_VAR) {
            config.max_size = parse_setting(POOL_SIZE_VAR, &raw)
                .filter(|size| *size > 0)
                .ok_or(PoolConfigError::Invalid {
                    name: POOL_SIZE_VAR,
                    value: raw,
                })?;
        }

        if let Some(raw) = lookup(CONNECT_TIMEOUT_VAR) {
            let seconds: u64 = parse_setting(CONNECT_TIMEOUT_VAR, &raw).ok_or(
                PoolConfigError::Invalid {
                    name: CONNECT_TIMEOUT_VAR,
                    value: raw,
                },
            )?;
            config.connection_timeout = Duration::from_secs(seconds);
        }

        Ok(config)
    }

    /// Overrides the maximum pool size.
    #[must_use]
    pub const fn with_max_size(mut self, max_size: u32) -> Self {
        self.max_size = max_size;
        self
    }

    /// Returns the database URL.
    #[must_use]
    pub fn database_url(&self) -> &str {
        &self.database_url
    }

    /// Returns the maximum pool size.
    #[must_use]
    pub const fn max_size(&self) -> u32 {
        self.max_size
    }

    /// Returns the connection timeout.
    #[must_use]
    pub const fn connection_timeout(&self) -> Duration {
        self.connection_timeout
    }

    /// Builds the r2d2 pool. Blocks until the first connection is made.
    ///
    /// # Errors
    ///
    /// Returns [`PoolConfigError::Pool`] when no connection can be opened.
    pub fn build_pool(&self) -> Result<CustomFieldPgPool, PoolConfigError> {
        let manager = ConnectionManager::<PgConnection>::new(self.database_url.as_str());
        let pool = Pool::builder()
            .max_size(self.max_size)
            .connection_timeout(self.connection_timeout)
            .build(manager)?;
        tracing::debug!(max_size = self.max_size, "custom field pool ready");
        Ok(pool)
    }
}

fn parse_setting<T: std::str::FromStr>(name: &'static str, raw: &str) -> Option<T> {
    let parsed = raw.trim().parse().ok();
    if parsed.is_none() {
        tracing::warn!(setting = name, value = raw, "unparseable setting");
    }
    parsed
}
