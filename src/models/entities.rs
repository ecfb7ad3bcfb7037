//! Store records
//!
//! Plain rows as persisted by a [`Store`](crate::store::Store).

/// A persisted book. The id is assigned by the store.
#[derive(Debug, Clone, PartialEq, Eq, sqlx::FromRow)]
pub struct Book {
    pub id: i64,
    pub title: String,
    pub author: String,
}

/// A persisted review.
///
/// `book_id` is not checked against the books table.
#[derive(Debug, Clone, PartialEq, Eq, sqlx::FromRow)]
pub struct Review {
    pub id: i64,
    pub book_id: i64,
    pub content: String,
    pub rating: i64,
}

/// A validated book waiting to be inserted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewBook {
    pub title: String,
    pub author: String,
}

/// A validated review waiting to be inserted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewReview {
    pub book_id: i64,
    pub content: String,
    pub rating: i64,
}
