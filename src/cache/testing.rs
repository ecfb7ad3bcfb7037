//! Test doubles for cache backends.

use std::time::Duration;

use async_trait::async_trait;

use crate::cache::CacheClient;
use crate::error::CacheError;

/// A backend that is never reachable.
pub struct UnavailableCache;

#[async_trait]
impl CacheClient for UnavailableCache {
    fn name(&self) -> &'static str {
        "unavailable"
    }

    async fn get(&self, _key: &str) -> Result<Option<String>, CacheError> {
        Err(CacheError::Down)
    }

    async fn set_with_ttl(
        &self,
        _key: &str,
        _value: &str,
        _ttl: Duration,
    ) -> Result<(), CacheError> {
        Err(CacheError::Down)
    }

    async fn delete(&self, _key: &str) -> Result<(), CacheError> {
        Err(CacheError::Down)
    }
}
