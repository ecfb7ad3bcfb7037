//! Cache-aside read path
//!
//! Check the cache, fall back to the loader on a miss, then populate the
//! cache with what the loader returned. The cache is never authoritative:
//! any trouble on the cache side (backend down, timeout, undecodable
//! value) is logged, counted, and handled exactly like a miss.

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use serde::{de::DeserializeOwned, Deserialize, Serialize};
use tracing::{debug, warn};

use crate::cache::{CacheClient, CacheKey, CacheStats};
use crate::error::CacheError;

// == Provenance ==
/// Where a payload came from. Serialized as `"cache"` or `"db"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Source {
    #[serde(rename = "cache")]
    Cache,
    #[serde(rename = "db")]
    Store,
}

/// A payload tagged with its provenance.
#[derive(Debug, Clone, PartialEq)]
pub struct Sourced<T> {
    pub payload: T,
    pub source: Source,
}

// == Cache Aside Reader ==
#[derive(Clone)]
pub struct CacheAside {
    cache: Arc<dyn CacheClient>,
    stats: Arc<CacheStats>,
}

impl CacheAside {
    pub fn new(cache: Arc<dyn CacheClient>, stats: Arc<CacheStats>) -> Self {
        Self { cache, stats }
    }

    /// Reads `key` through the cache.
    ///
    /// On a hit the cached payload is returned exactly as stored, derived
    /// fields included. On a miss `loader` runs against the store; its
    /// error is returned untouched and nothing is cached. A successful
    /// load is written back with `ttl` on a best-effort basis.
    pub async fn read<T, E, F, Fut>(
        &self,
        key: CacheKey,
        ttl: Duration,
        loader: F,
    ) -> Result<Sourced<T>, E>
    where
        T: Serialize + DeserializeOwned,
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<T, E>>,
    {
        let key = key.to_string();

        if let Some(payload) = self.lookup(&key).await {
            self.stats.record_hit();
            return Ok(Sourced {
                payload,
                source: Source::Cache,
            });
        }

        self.stats.record_miss();
        let payload = loader().await?;
        self.populate(&key, &payload, ttl).await;

        Ok(Sourced {
            payload,
            source: Source::Store,
        })
    }

    async fn lookup<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
        match self.cache.get(key).await {
            Ok(Some(raw)) => match serde_json::from_str(&raw) {
                Ok(payload) => {
                    debug!("Cache hit for '{}'", key);
                    Some(payload)
                }
                Err(err) => {
                    self.stats.record_error();
                    warn!("Discarding cache value for '{}': {}", key, CacheError::from(err));
                    None
                }
            },
            Ok(None) => {
                debug!("Cache miss for '{}'", key);
                None
            }
            Err(err) => {
                self.stats.record_error();
                warn!(
                    "Cache read for '{}' failed, falling back to store: {}",
                    key, err
                );
                None
            }
        }
    }

    async fn populate<T: Serialize>(&self, key: &str, payload: &T, ttl: Duration) {
        let raw = match serde_json::to_string(payload) {
            Ok(raw) => raw,
            Err(err) => {
                self.stats.record_error();
                warn!("Not caching '{}': {}", key, CacheError::from(err));
                return;
            }
        };

        if let Err(err) = self.cache.set_with_ttl(key, &raw, ttl).await {
            self.stats.record_error();
            warn!("Cache write for '{}' failed: {}", key, err);
        }
    }
}
