//! Response DTOs for the book review API
//!
//! Defines the structure of outgoing HTTP response bodies. Every JSON
//! envelope carries `status` and `status_code` next to its `data` or
//! `message`.

use axum::http::StatusCode;
use serde::{Deserialize, Serialize};

use crate::cache::{Source, StatsSnapshot};
use crate::models::{Book, Review};

const SUCCESS: &str = "success";
const ERROR: &str = "error";

// == Payload Views ==

/// A book as exposed by the API.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BookView {
    pub book_id: i64,
    pub book_title: String,
    pub book_author: String,
}

impl From<Book> for BookView {
    fn from(book: Book) -> Self {
        Self {
            book_id: book.id,
            book_title: book.title,
            book_author: book.author,
        }
    }
}

/// A review inside a book's review listing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReviewView {
    pub review_id: i64,
    pub content: String,
    pub rating: i64,
}

impl From<Review> for ReviewView {
    fn from(review: Review) -> Self {
        Self {
            review_id: review.id,
            content: review.content,
            rating: review.rating,
        }
    }
}

/// A freshly created review, echoed back with its book id.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CreatedReview {
    pub review_id: i64,
    pub book_id: i64,
    pub content: String,
    pub rating: i64,
}

impl From<Review> for CreatedReview {
    fn from(review: Review) -> Self {
        Self {
            review_id: review.id,
            book_id: review.book_id,
            content: review.content,
            rating: review.rating,
        }
    }
}

// == Review Listing ==
/// The cacheable payload behind GET /books/:book_id/reviews.
///
/// `message` and `average_rating` are derived once when the listing is
/// built and travel with it through the cache, so a hit returns the
/// statistics as of caching time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReviewListing {
    pub message: String,
    pub data: Vec<ReviewView>,
    pub average_rating: f64,
}

impl ReviewListing {
    /// Builds a listing from store rows. An empty list averages to 0.
    pub fn from_reviews(reviews: Vec<Review>) -> Self {
        let data: Vec<ReviewView> = reviews.into_iter().map(ReviewView::from).collect();
        let average_rating = if data.is_empty() {
            0.0
        } else {
            data.iter().map(|r| r.rating as f64).sum::<f64>() / data.len() as f64
        };

        Self {
            message: format!("Found {} review(s)", data.len()),
            data,
            average_rating,
        }
    }
}

// == Envelopes ==

/// Response body for GET /books
#[derive(Debug, Clone, Serialize)]
pub struct BooksResponse {
    pub status: &'static str,
    pub status_code: u16,
    pub source: Source,
    pub data: Vec<BookView>,
}

impl BooksResponse {
    pub fn new(data: Vec<BookView>, source: Source) -> Self {
        Self {
            status: SUCCESS,
            status_code: StatusCode::OK.as_u16(),
            source,
            data,
        }
    }
}

/// Response body for GET /books/:book_id/reviews
#[derive(Debug, Clone, Serialize)]
pub struct ReviewsResponse {
    pub status: &'static str,
    pub status_code: u16,
    pub message: String,
    pub data: Vec<ReviewView>,
    pub average_rating: f64,
    pub source: Source,
}

impl ReviewsResponse {
    pub fn new(listing: ReviewListing, source: Source) -> Self {
        Self {
            status: SUCCESS,
            status_code: StatusCode::OK.as_u16(),
            message: listing.message,
            data: listing.data,
            average_rating: listing.average_rating,
            source,
        }
    }
}

/// Response body for a successful POST (201 Created)
#[derive(Debug, Clone, Serialize)]
pub struct CreatedResponse<T> {
    pub status: &'static str,
    pub status_code: u16,
    pub message: String,
    pub data: T,
}

impl<T> CreatedResponse<T> {
    pub fn new(message: impl Into<String>, data: T) -> Self {
        Self {
            status: SUCCESS,
            status_code: StatusCode::CREATED.as_u16(),
            message: message.into(),
            data,
        }
    }
}

/// Error response body for all error conditions
#[derive(Debug, Clone, Serialize)]
pub struct ErrorResponse {
    pub status: &'static str,
    pub status_code: u16,
    pub message: String,
}

impl ErrorResponse {
    /// Creates a new ErrorResponse
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status: ERROR,
            status_code: status.as_u16(),
            message: message.into(),
        }
    }
}

/// Response body for the health endpoint (GET /health)
#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    /// Health status (e.g., "healthy")
    pub status: String,
    /// Current timestamp in ISO 8601 format
    pub timestamp: String,
}

impl HealthResponse {
    /// Creates a new HealthResponse with current timestamp
    pub fn healthy() -> Self {
        Self {
            status: "healthy".to_string(),
            timestamp: chrono::Utc::now().to_rfc3339(),
        }
    }
}

/// Response body for the stats endpoint (GET /stats)
#[derive(Debug, Clone, Serialize)]
pub struct StatsResponse {
    /// Which cache backend is serving reads ("memory" or "redis")
    pub backend: &'static str,
    pub hits: u64,
    pub misses: u64,
    /// Cache operations that failed and were recovered locally
    pub cache_errors: u64,
    pub invalidations: u64,
    /// hits / (hits + misses)
    pub hit_rate: f64,
}

impl StatsResponse {
    pub fn new(backend: &'static str, stats: StatsSnapshot) -> Self {
        Self {
            backend,
            hits: stats.hits,
            misses: stats.misses,
            cache_errors: stats.cache_errors,
            invalidations: stats.invalidations,
            hit_rate: stats.hit_rate(),
        }
    }
}
