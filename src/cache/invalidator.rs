//! Invalidation on write
//!
//! After the store accepts a mutation, the keys whose query results it
//! could change are deleted so the next read reconsults the store. Keys
//! are never rewritten here; repopulating is the read path's job.

use std::sync::Arc;

use tracing::{debug, warn};

use crate::cache::{CacheClient, CacheKey, CacheStats};

#[derive(Clone)]
pub struct WriteInvalidator {
    cache: Arc<dyn CacheClient>,
    stats: Arc<CacheStats>,
}

impl WriteInvalidator {
    pub fn new(cache: Arc<dyn CacheClient>, stats: Arc<CacheStats>) -> Self {
        Self { cache, stats }
    }

    /// Deletes `key`, best effort.
    ///
    /// Returns `false` when the backend failed; the entry then survives
    /// until its TTL runs out. The write itself is not affected.
    pub async fn invalidate(&self, key: CacheKey) -> bool {
        let raw = key.to_string();
        match self.cache.delete(&raw).await {
            Ok(()) => {
                self.stats.record_invalidation();
                debug!("Invalidated cache key '{}'", raw);
                true
            }
            Err(err) => {
                self.stats.record_error();
                warn!(
                    "Could not invalidate '{}', it may serve stale data until it expires: {}",
                    raw, err
                );
                false
            }
        }
    }
}
