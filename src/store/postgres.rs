//! PostgreSQL-backed store.

use async_trait::async_trait;
use sqlx::postgres::{PgPool, PgPoolOptions};

use crate::error::StoreError;
use crate::models::{Book, NewBook, NewReview, Review};
use crate::store::Store;

#[derive(Clone)]
pub struct PostgresStore {
    pool: PgPool,
}

impl PostgresStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn connect(url: &str, max_connections: u32) -> Result<Self, StoreError> {
        let pool = PgPoolOptions::new()
            .max_connections(max_connections)
            .connect(url)
            .await?;
        Ok(Self::new(pool))
    }

    /// Applies the embedded migrations under `migrations/`.
    pub async fn run_migrations(&self) -> Result<(), StoreError> {
        sqlx::migrate!("./migrations").run(&self.pool).await?;
        Ok(())
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }
}

#[async_trait]
impl Store for PostgresStore {
    async fn all_books(&self) -> Result<Vec<Book>, StoreError> {
        let books = sqlx::query_as::<_, Book>(
            r#"
            SELECT id, title, author
            FROM books
            ORDER BY id
            "#,
        )
        .fetch_all(self.pool())
        .await?;

        Ok(books)
    }

    async fn reviews_for_book(&self, book_id: i64) -> Result<Vec<Review>, StoreError> {
        let reviews = sqlx::query_as::<_, Review>(
            r#"
            SELECT id, book_id, content, rating
            FROM reviews
            WHERE book_id = $1
            ORDER BY id
            "#,
        )
        .bind(book_id)
        .fetch_all(self.pool())
        .await?;

        Ok(reviews)
    }

    async fn insert_book(&self, book: NewBook) -> Result<Book, StoreError> {
        let book = sqlx::query_as::<_, Book>(
            r#"
            INSERT INTO books (title, author)
            VALUES ($1, $2)
            RETURNING id, title, author
            "#,
        )
        .bind(book.title)
        .bind(book.author)
        .fetch_one(self.pool())
        .await?;

        Ok(book)
    }

    async fn insert_review(&self, review: NewReview) -> Result<Review, StoreError> {
        let review = sqlx::query_as::<_, Review>(
            r#"
            INSERT INTO reviews (book_id, content, rating)
            VALUES ($1, $2, $3)
            RETURNING id, book_id, content, rating
            "#,
        )
        .bind(review.book_id)
        .bind(review.content)
        .bind(review.rating)
        .fetch_one(self.pool())
        .await?;

        Ok(review)
    }
}
