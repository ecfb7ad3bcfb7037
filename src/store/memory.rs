//! In-memory store, used when no database is configured and in tests.

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::error::StoreError;
use crate::models::{Book, NewBook, NewReview, Review};
use crate::store::Store;

#[derive(Debug, Default)]
struct Tables {
    books: Vec<Book>,
    reviews: Vec<Review>,
}

/// Volatile [`Store`] with ids assigned sequentially from 1.
#[derive(Debug, Default)]
pub struct MemoryStore {
    tables: RwLock<Tables>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl Store for MemoryStore {
    async fn all_books(&self) -> Result<Vec<Book>, StoreError> {
        Ok(self.tables.read().await.books.clone())
    }

    async fn reviews_for_book(&self, book_id: i64) -> Result<Vec<Review>, StoreError> {
        let tables = self.tables.read().await;
        Ok(tables
            .reviews
            .iter()
            .filter(|review| review.book_id == book_id)
            .cloned()
            .collect())
    }

    async fn insert_book(&self, book: NewBook) -> Result<Book, StoreError> {
        let mut tables = self.tables.write().await;
        let book = Book {
            id: tables.books.len() as i64 + 1,
            title: book.title,
            author: book.author,
        };
        tables.books.push(book.clone());
        Ok(book)
    }

    async fn insert_review(&self, review: NewReview) -> Result<Review, StoreError> {
        let mut tables = self.tables.write().await;
        let review = Review {
            id: tables.reviews.len() as i64 + 1,
            book_id: review.book_id,
            content: review.content,
            rating: review.rating,
        };
        tables.reviews.push(review.clone());
        Ok(review)
    }
}
