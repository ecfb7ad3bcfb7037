//! Cache key scheme
//!
//! One variant per cached query. Keys for different books never collide.

use std::fmt;

/// Identifies a cached query result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CacheKey {
    /// The full books list: `"books"`
    Books,
    /// One book's reviews: `"reviews:{book_id}"`
    Reviews(i64),
}

impl fmt::Display for CacheKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CacheKey::Books => f.write_str("books"),
            CacheKey::Reviews(book_id) => write!(f, "reviews:{}", book_id),
        }
    }
}
