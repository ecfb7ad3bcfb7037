//! API Module
//!
//! HTTP handlers and routing for the book review REST API.
//!
//! # Endpoints
//! - `GET /books` - List books (cached)
//! - `POST /books` - Add a book
//! - `GET /books/:book_id/reviews` - List a book's reviews (cached)
//! - `POST /books/:book_id/reviews` - Add a review
//! - `GET /stats` - Cache statistics
//! - `GET /health` - Health check endpoint

pub mod handlers;
pub mod routes;

pub use handlers::*;
pub use routes::create_router;
