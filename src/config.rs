//! Configuration Module
//!
//! Handles loading and managing server configuration from environment variables.

use std::env;
use std::str::FromStr;
use std::time::Duration;

use crate::cache::DEFAULT_TTL_SECS;

/// Server configuration parameters.
///
/// All values can be configured via environment variables with sensible defaults.
#[derive(Debug, Clone)]
pub struct Config {
    /// HTTP server port
    pub server_port: u16,
    /// PostgreSQL connection string; the in-memory store is used when unset
    pub database_url: Option<String>,
    /// Size of the database connection pool
    pub db_max_connections: u32,
    /// Redis connection string; the in-process cache is used when unset
    pub redis_url: Option<String>,
    /// Lifetime of cached list responses, in seconds
    pub cache_ttl: u64,
    /// Bound on each Redis round trip, in milliseconds
    pub cache_timeout_ms: u64,
    /// In-process cache purge interval, in seconds
    pub cleanup_interval: u64,
}

impl Config {
    /// Creates a new Config by loading values from environment variables.
    ///
    /// # Environment Variables
    /// - `SERVER_PORT` - HTTP server port (default: 5000)
    /// - `DATABASE_URL` - PostgreSQL URL (default: unset, in-memory store)
    /// - `DB_MAX_CONNECTIONS` - Pool size (default: 5)
    /// - `REDIS_URL` - Redis URL (default: unset, in-process cache)
    /// - `CACHE_TTL` - Cache TTL in seconds (default: 60)
    /// - `CACHE_TIMEOUT_MS` - Redis timeout in milliseconds (default: 500)
    /// - `CLEANUP_INTERVAL` - Purge frequency in seconds (default: 1)
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            server_port: parse_env("SERVER_PORT", defaults.server_port),
            database_url: optional_env("DATABASE_URL"),
            db_max_connections: parse_env("DB_MAX_CONNECTIONS", defaults.db_max_connections),
            redis_url: optional_env("REDIS_URL"),
            cache_ttl: parse_env("CACHE_TTL", defaults.cache_ttl),
            cache_timeout_ms: parse_env("CACHE_TIMEOUT_MS", defaults.cache_timeout_ms),
            cleanup_interval: parse_env("CLEANUP_INTERVAL", defaults.cleanup_interval),
        }
    }

    pub fn cache_ttl(&self) -> Duration {
        Duration::from_secs(self.cache_ttl)
    }

    pub fn cache_timeout(&self) -> Duration {
        Duration::from_millis(self.cache_timeout_ms)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server_port: 5000,
            database_url: None,
            db_max_connections: 5,
            redis_url: None,
            cache_ttl: DEFAULT_TTL_SECS,
            cache_timeout_ms: 500,
            cleanup_interval: 1,
        }
    }
}

/// Unset or unparsable values fall back to `default`.
fn parse_env<T: FromStr>(name: &str, default: T) -> T {
    env::var(name)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}

fn optional_env(name: &str) -> Option<String> {
    env::var(name).ok().filter(|v| !v.trim().is_empty())
}
