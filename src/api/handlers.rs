//! API Handlers
//!
//! HTTP request handlers for books and reviews. Reads go through the
//! cache-aside reader; writes go straight to the store and then
//! invalidate the affected key before the response is built.

use std::sync::Arc;
use std::time::Duration;

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    Json,
};
use tracing::info;

use crate::cache::{CacheAside, CacheClient, CacheKey, CacheStats, WriteInvalidator};
use crate::error::{AppError, Result, StoreError};
use crate::models::{
    BookView, BooksResponse, CreateBookRequest, CreateReviewRequest, CreatedResponse,
    CreatedReview, HealthResponse, ReviewListing, ReviewsResponse, StatsResponse,
};
use crate::store::Store;

/// Application state shared across all handlers.
///
/// Store and cache are injected at construction; nothing here is global.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn Store>,
    pub reader: CacheAside,
    pub invalidator: WriteInvalidator,
    pub stats: Arc<CacheStats>,
    /// Name of the cache backend, reported by `/stats`
    pub cache_backend: &'static str,
    /// TTL applied to every cached list
    pub ttl: Duration,
}

impl AppState {
    /// Wires the reader and invalidator over one shared cache client.
    pub fn new(store: Arc<dyn Store>, cache: Arc<dyn CacheClient>, ttl: Duration) -> Self {
        let stats = Arc::new(CacheStats::new());
        Self {
            store,
            reader: CacheAside::new(cache.clone(), stats.clone()),
            invalidator: WriteInvalidator::new(cache.clone(), stats.clone()),
            stats,
            cache_backend: cache.name(),
            ttl,
        }
    }
}

/// Turns an unreadable JSON body into a 400 with the usual error envelope.
fn json_body<T>(body: std::result::Result<Json<T>, JsonRejection>) -> Result<T> {
    body.map(|Json(value)| value)
        .map_err(|rejection| AppError::Validation(rejection.body_text()))
}

/// Handler for GET /books
pub async fn list_books(State(state): State<AppState>) -> Result<Json<BooksResponse>> {
    let store = Arc::clone(&state.store);
    let books = state
        .reader
        .read(CacheKey::Books, state.ttl, move || async move {
            let books = store.all_books().await?;
            Ok::<_, StoreError>(books.into_iter().map(BookView::from).collect::<Vec<_>>())
        })
        .await?;

    Ok(Json(BooksResponse::new(books.payload, books.source)))
}

/// Handler for POST /books
pub async fn add_book(
    State(state): State<AppState>,
    body: std::result::Result<Json<CreateBookRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<CreatedResponse<BookView>>)> {
    let new_book = json_body(body)?
        .validate()
        .map_err(AppError::Validation)?;

    let book = state.store.insert_book(new_book).await?;
    info!("Added book {} '{}'", book.id, book.title);

    state.invalidator.invalidate(CacheKey::Books).await;

    Ok((
        StatusCode::CREATED,
        Json(CreatedResponse::new(
            "Book added successfully",
            BookView::from(book),
        )),
    ))
}

/// Handler for GET /books/:book_id/reviews
///
/// An unknown book is not an error: it has zero reviews.
pub async fn list_reviews(
    State(state): State<AppState>,
    Path(book_id): Path<i64>,
) -> Result<Json<ReviewsResponse>> {
    let store = Arc::clone(&state.store);
    let listing = state
        .reader
        .read(CacheKey::Reviews(book_id), state.ttl, move || async move {
            let reviews = store.reviews_for_book(book_id).await?;
            Ok::<_, StoreError>(ReviewListing::from_reviews(reviews))
        })
        .await?;

    Ok(Json(ReviewsResponse::new(listing.payload, listing.source)))
}

/// Handler for POST /books/:book_id/reviews
pub async fn add_review(
    State(state): State<AppState>,
    Path(book_id): Path<i64>,
    body: std::result::Result<Json<CreateReviewRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<CreatedResponse<CreatedReview>>)> {
    let new_review = json_body(body)?
        .validate(book_id)
        .map_err(AppError::Validation)?;

    let review = state.store.insert_review(new_review).await?;
    info!("Added review {} for book {}", review.id, review.book_id);

    state
        .invalidator
        .invalidate(CacheKey::Reviews(review.book_id))
        .await;

    Ok((
        StatusCode::CREATED,
        Json(CreatedResponse::new(
            "Review added successfully",
            CreatedReview::from(review),
        )),
    ))
}

/// Handler for GET /
pub async fn index() -> &'static str {
    "Book Review API is running"
}

/// Handler for GET /stats
pub async fn stats_handler(State(state): State<AppState>) -> Json<StatsResponse> {
    Json(StatsResponse::new(
        state.cache_backend,
        state.stats.snapshot(),
    ))
}

/// Handler for GET /health
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse::healthy())
}
