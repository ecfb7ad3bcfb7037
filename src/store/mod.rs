//! Persistent store
//!
//! The source of truth for books and reviews. Handlers only ever see the
//! [`Store`] trait; which implementation backs it is decided at startup.

mod memory;
mod postgres;

pub use memory::MemoryStore;
pub use postgres::PostgresStore;

use async_trait::async_trait;

use crate::error::StoreError;
use crate::models::{Book, NewBook, NewReview, Review};

/// Query and insert operations over the two entities.
#[async_trait]
pub trait Store: Send + Sync {
    /// Every book, in insertion order.
    async fn all_books(&self) -> Result<Vec<Book>, StoreError>;

    /// Reviews attached to `book_id`, in insertion order. An unknown book
    /// yields an empty list.
    async fn reviews_for_book(&self, book_id: i64) -> Result<Vec<Review>, StoreError>;

    async fn insert_book(&self, book: NewBook) -> Result<Book, StoreError>;

    /// Inserts a review without checking that its book exists.
    async fn insert_review(&self, review: NewReview) -> Result<Review, StoreError>;
}
