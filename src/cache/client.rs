//! Cache Client Trait
//!
//! The key-value contract every cache backend fulfils. Backends report
//! failures through [`CacheError`]; deciding what a failure means is left
//! to the caller.

use std::time::Duration;

use async_trait::async_trait;

use crate::error::CacheError;

/// Get / set-with-expiry / delete against a key-value store.
#[async_trait]
pub trait CacheClient: Send + Sync {
    /// Short backend name for logs and `/stats` ("memory", "redis").
    fn name(&self) -> &'static str;

    /// Returns the raw serialized value if present and not expired.
    async fn get(&self, key: &str) -> Result<Option<String>, CacheError>;

    /// Stores `value` under `key`, expiring after `ttl`.
    async fn set_with_ttl(&self, key: &str, value: &str, ttl: Duration) -> Result<(), CacheError>;

    /// Removes `key`. Deleting a missing key succeeds.
    async fn delete(&self, key: &str) -> Result<(), CacheError>;
}
