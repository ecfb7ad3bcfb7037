//! Integration Tests for API Endpoints
//!
//! Tests full request/response cycles, including cache provenance,
//! invalidation on write, and degradation when the cache or store fails.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use axum::{
    body::Body,
    http::{Request, StatusCode},
    Router,
};
use book_review_api::{
    api::create_router,
    cache::{CacheClient, MemoryCache},
    error::{CacheError, StoreError},
    models::{Book, NewBook, NewReview, Review},
    store::{MemoryStore, Store},
    AppState,
};
use serde_json::Value;
use tower::ServiceExt;

// == Fakes ==

/// Cache backend whose server is down.
struct DownCache;

#[async_trait]
impl CacheClient for DownCache {
    fn name(&self) -> &'static str {
        "down"
    }

    async fn get(&self, _key: &str) -> Result<Option<String>, CacheError> {
        Err(CacheError::Timeout)
    }

    async fn set_with_ttl(&self, _: &str, _: &str, _: Duration) -> Result<(), CacheError> {
        Err(CacheError::Timeout)
    }

    async fn delete(&self, _key: &str) -> Result<(), CacheError> {
        Err(CacheError::Timeout)
    }
}

/// Store whose database is gone.
struct BrokenStore;

#[async_trait]
impl Store for BrokenStore {
    async fn all_books(&self) -> Result<Vec<Book>, StoreError> {
        Err(StoreError::Database(sqlx::Error::PoolTimedOut))
    }

    async fn reviews_for_book(&self, _book_id: i64) -> Result<Vec<Review>, StoreError> {
        Err(StoreError::Database(sqlx::Error::PoolTimedOut))
    }

    async fn insert_book(&self, _book: NewBook) -> Result<Book, StoreError> {
        Err(StoreError::Database(sqlx::Error::PoolTimedOut))
    }

    async fn insert_review(&self, _review: NewReview) -> Result<Review, StoreError> {
        Err(StoreError::Database(sqlx::Error::PoolTimedOut))
    }
}

// == Helper Functions ==

fn app_with(store: Arc<dyn Store>, cache: Arc<dyn CacheClient>, ttl: Duration) -> Router {
    create_router(AppState::new(store, cache, ttl))
}

fn create_test_app() -> Router {
    app_with(
        Arc::new(MemoryStore::new()),
        Arc::new(MemoryCache::new()),
        Duration::from_secs(60),
    )
}

async fn body_to_json(body: Body) -> Value {
    let bytes = axum::body::to_bytes(body, usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

async fn get(app: &Router, uri: &str) -> (StatusCode, Value) {
    let response = app
        .clone()
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();
    let status = response.status();
    (status, body_to_json(response.into_body()).await)
}

async fn post(app: &Router, uri: &str, json: &str) -> (StatusCode, Value) {
    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri(uri)
                .header("content-type", "application/json")
                .body(Body::from(json.to_string()))
                .unwrap(),
        )
        .await
        .unwrap();
    let status = response.status();
    (status, body_to_json(response.into_body()).await)
}

// == Books ==

#[tokio::test]
async fn test_add_book() {
    let app = create_test_app();

    let (status, json) = post(&app, "/books", r#"{"title":"1984","author":"George Orwell"}"#).await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(json["status"], "success");
    assert_eq!(json["status_code"], 201);
    assert_eq!(json["message"], "Book added successfully");
    assert_eq!(json["data"]["book_title"], "1984");
    assert_eq!(json["data"]["book_author"], "George Orwell");
    assert!(json["data"]["book_id"].as_i64().is_some());
}

#[tokio::test]
async fn test_list_books_miss_then_hit() {
    let app = create_test_app();
    post(&app, "/books", r#"{"title":"Sapiens","author":"Yuval Noah Harari"}"#).await;

    let (status, first) = get(&app, "/books").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(first["source"], "db");
    assert_eq!(first["status_code"], 200);

    let (_, second) = get(&app, "/books").await;
    assert_eq!(second["source"], "cache");
    assert_eq!(second["data"], first["data"]);
}

#[tokio::test]
async fn test_add_book_invalidates_cached_list() {
    let app = create_test_app();

    // Cache an empty list right before the write
    let (_, before) = get(&app, "/books").await;
    assert_eq!(before["data"].as_array().unwrap().len(), 0);
    let (_, cached) = get(&app, "/books").await;
    assert_eq!(cached["source"], "cache");

    post(&app, "/books", r#"{"title":"1984","author":"George Orwell"}"#).await;

    let (_, after) = get(&app, "/books").await;
    assert_eq!(after["source"], "db");
    let books = after["data"].as_array().unwrap();
    assert_eq!(books.len(), 1);
    assert_eq!(books[0]["book_title"], "1984");
}

#[tokio::test]
async fn test_add_book_missing_author() {
    let app = create_test_app();

    let (status, json) = post(&app, "/books", r#"{"title":"1984"}"#).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["status"], "error");
    assert_eq!(json["status_code"], 400);
    assert_eq!(json["message"], "Title and Author are required");

    let (_, listed) = get(&app, "/books").await;
    assert!(listed["data"].as_array().unwrap().is_empty());
}

#[tokio::test]
async fn test_add_book_empty_title() {
    let app = create_test_app();

    let (status, _) = post(&app, "/books", r#"{"title":"","author":"Anon"}"#).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_invalid_json_request() {
    let app = create_test_app();

    let (status, json) = post(&app, "/books", r#"{"invalid json"#).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["status"], "error");
}

// == Reviews ==

#[tokio::test]
async fn test_add_review() {
    let app = create_test_app();
    post(&app, "/books", r#"{"title":"Test Book","author":"Test Author"}"#).await;

    let (status, json) = post(
        &app,
        "/books/1/reviews",
        r#"{"content":"Great book!","rating":5}"#,
    )
    .await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(json["message"], "Review added successfully");
    assert_eq!(json["data"]["content"], "Great book!");
    assert_eq!(json["data"]["rating"], 5);
    assert_eq!(json["data"]["book_id"], 1);
}

#[tokio::test]
async fn test_add_review_missing_rating() {
    let app = create_test_app();

    let (status, json) = post(&app, "/books/1/reviews", r#"{"content":"Great book!"}"#).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["message"], "Content and Rating are required");
}

#[tokio::test]
async fn test_list_reviews_average() {
    let app = create_test_app();
    for rating in [5, 3, 4] {
        let body = format!(r#"{{"content":"review","rating":{}}}"#, rating);
        post(&app, "/books/1/reviews", &body).await;
    }

    let (status, json) = get(&app, "/books/1/reviews").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["average_rating"], 4.0);
    assert_eq!(json["message"], "Found 3 review(s)");
    assert_eq!(json["source"], "db");
    let reviews = json["data"].as_array().unwrap();
    assert_eq!(reviews.len(), 3);
    assert!(reviews[0].get("review_id").is_some());
}

#[tokio::test]
async fn test_list_reviews_empty_book() {
    let app = create_test_app();

    let (status, json) = get(&app, "/books/42/reviews").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["average_rating"], 0.0);
    assert!(json["data"].as_array().unwrap().is_empty());
}

#[tokio::test]
async fn test_add_review_invalidates_its_book_only() {
    let app = create_test_app();

    get(&app, "/books/1/reviews").await;
    get(&app, "/books/2/reviews").await;

    post(&app, "/books/1/reviews", r#"{"content":"Loved it","rating":4}"#).await;

    let (_, book_one) = get(&app, "/books/1/reviews").await;
    assert_eq!(book_one["source"], "db");
    assert_eq!(book_one["data"].as_array().unwrap().len(), 1);
    assert_eq!(book_one["average_rating"], 4.0);

    let (_, book_two) = get(&app, "/books/2/reviews").await;
    assert_eq!(book_two["source"], "cache");
    assert!(book_two["data"].as_array().unwrap().is_empty());
}

// == Cache Expiry ==

#[tokio::test]
async fn test_ttl_expiration_falls_back_to_store() {
    let app = app_with(
        Arc::new(MemoryStore::new()),
        Arc::new(MemoryCache::new()),
        Duration::from_secs(1),
    );

    let (_, first) = get(&app, "/books").await;
    assert_eq!(first["source"], "db");
    let (_, second) = get(&app, "/books").await;
    assert_eq!(second["source"], "cache");

    tokio::time::sleep(Duration::from_millis(1100)).await;

    let (_, third) = get(&app, "/books").await;
    assert_eq!(third["source"], "db");
}

// == Degradation ==

#[tokio::test]
async fn test_cache_down_still_serves_from_store() {
    let app = app_with(
        Arc::new(MemoryStore::new()),
        Arc::new(DownCache),
        Duration::from_secs(60),
    );

    let (status, _) = post(&app, "/books", r#"{"title":"Dune","author":"Frank Herbert"}"#).await;
    assert_eq!(status, StatusCode::CREATED);
    let (status, _) = post(&app, "/books/1/reviews", r#"{"content":"Epic","rating":5}"#).await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, books) = get(&app, "/books").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(books["source"], "db");
    assert_eq!(books["data"][0]["book_title"], "Dune");

    let (status, reviews) = get(&app, "/books/1/reviews").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(reviews["source"], "db");
    assert_eq!(reviews["average_rating"], 5.0);

    let (_, stats) = get(&app, "/stats").await;
    assert_eq!(stats["backend"], "down");
    assert!(stats["cache_errors"].as_u64().unwrap() >= 4);
}

#[tokio::test]
async fn test_store_failure_is_server_error() {
    let cache = Arc::new(MemoryCache::new());
    let app = app_with(Arc::new(BrokenStore), cache.clone(), Duration::from_secs(60));

    let (status, json) = get(&app, "/books").await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(json["status"], "error");
    assert_eq!(json["status_code"], 500);

    let (status, _) = post(&app, "/books", r#"{"title":"1984","author":"George Orwell"}"#).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);

    // A failed load leaves nothing behind in the cache
    assert!(cache.is_empty().await);
}

// == Misc Endpoints ==

#[tokio::test]
async fn test_stats_endpoint() {
    let app = create_test_app();

    get(&app, "/books").await;
    get(&app, "/books").await;
    post(&app, "/books", r#"{"title":"1984","author":"George Orwell"}"#).await;

    let (status, json) = get(&app, "/stats").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["backend"], "memory");
    assert_eq!(json["hits"], 1);
    assert_eq!(json["misses"], 1);
    assert_eq!(json["invalidations"], 1);
    assert_eq!(json["cache_errors"], 0);
    assert_eq!(json["hit_rate"], 0.5);
}

#[tokio::test]
async fn test_health_endpoint() {
    let app = create_test_app();

    let (status, json) = get(&app, "/health").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["status"], "healthy");
    assert!(json.get("timestamp").is_some());
}
