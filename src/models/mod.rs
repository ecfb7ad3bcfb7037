//! Domain records and HTTP DTOs
//!
//! Records are what the store hands back; requests and responses are the
//! JSON shapes exchanged with clients.

pub mod entities;
pub mod requests;
pub mod responses;

// Re-export commonly used types
pub use entities::{Book, NewBook, NewReview, Review};
pub use requests::{CreateBookRequest, CreateReviewRequest};
pub use responses::{
    BookView, BooksResponse, CreatedResponse, CreatedReview, ErrorResponse, HealthResponse,
    ReviewListing, ReviewView, ReviewsResponse, StatsResponse,
};
