//! Request DTOs for the book review API
//!
//! Defines the structure of incoming HTTP request bodies. Every field is
//! optional at the serde level so that a missing field is reported as a
//! validation failure rather than a body rejection.

use serde::Deserialize;

use crate::models::{NewBook, NewReview};

/// Request body for POST /books
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CreateBookRequest {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub author: Option<String>,
}

impl CreateBookRequest {
    /// Validates the request and turns it into an insertable book.
    ///
    /// Both `title` and `author` must be present and non-empty.
    pub fn validate(self) -> Result<NewBook, String> {
        match (non_empty(self.title), non_empty(self.author)) {
            (Some(title), Some(author)) => Ok(NewBook { title, author }),
            _ => Err("Title and Author are required".to_string()),
        }
    }
}

/// Request body for POST /books/:book_id/reviews
///
/// `rating` carries no range check; any integer is accepted.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CreateReviewRequest {
    #[serde(default)]
    pub content: Option<String>,
    #[serde(default)]
    pub rating: Option<i64>,
}

impl CreateReviewRequest {
    /// Validates the request for the given book.
    ///
    /// `content` must be non-empty and `rating` present (zero is allowed).
    pub fn validate(self, book_id: i64) -> Result<NewReview, String> {
        match (non_empty(self.content), self.rating) {
            (Some(content), Some(rating)) => Ok(NewReview {
                book_id,
                content,
                rating,
            }),
            _ => Err("Content and Rating are required".to_string()),
        }
    }
}

fn non_empty(field: Option<String>) -> Option<String> {
    field.filter(|value| !value.is_empty())
}
