//! Cache Module
//!
//! Cache-aside layer in front of the store: a backend-agnostic client
//! trait with in-process and Redis backends, the read path, and
//! invalidation on write.

mod client;
mod entry;
mod invalidator;
mod key;
mod memory;
mod reader;
mod redis;
mod stats;

#[cfg(test)]
pub(crate) mod testing;


// Re-export public types
pub use self::redis::RedisCache;
pub use client::CacheClient;
pub use entry::CacheEntry;
pub use invalidator::WriteInvalidator;
pub use key::CacheKey;
pub use memory::MemoryCache;
pub use reader::{CacheAside, Source, Sourced};
pub use stats::{CacheStats, StatsSnapshot};

// == Public Constants ==
/// Default lifetime of a cached list, in seconds
pub const DEFAULT_TTL_SECS: u64 = 60;
