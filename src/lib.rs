//! Book Review API - books and reviews over HTTP
//!
//! List queries are served through a cache-aside layer with TTL expiry and
//! invalidation on write; the store stays the source of truth.

pub mod api;
pub mod cache;
pub mod config;
pub mod error;
pub mod models;
pub mod store;
pub mod tasks;

pub use api::AppState;
pub use config::Config;
pub use tasks::spawn_cleanup_task;
