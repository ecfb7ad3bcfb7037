//! Book Review API server binary.

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Context;
use tokio::{signal, task::JoinHandle};
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use book_review_api::{
    api::create_router,
    cache::{CacheClient, MemoryCache, RedisCache},
    spawn_cleanup_task,
    store::{MemoryStore, PostgresStore, Store},
    AppState, Config,
};

/// Main entry point for the Book Review API server.
///
/// # Startup Sequence
/// 1. Initialize tracing subscriber for logging
/// 2. Load configuration from environment variables
/// 3. Connect the store (PostgreSQL + migrations, or in-memory)
/// 4. Pick the cache backend (Redis, or in-process with a cleanup task)
/// 5. Start HTTP server on configured port
/// 6. Handle graceful shutdown on SIGINT/SIGTERM
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Defaults to "info" level, can be overridden with RUST_LOG env var
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "book_review_api=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Book Review API");

    let config = Config::from_env();
    info!(
        "Configuration loaded: port={}, cache_ttl={}s, database={}, redis={}",
        config.server_port,
        config.cache_ttl,
        config.database_url.is_some(),
        config.redis_url.is_some()
    );

    let store = connect_store(&config).await?;
    let (cache, cleanup_handle) = build_cache(&config)?;

    let state = AppState::new(store, cache, config.cache_ttl());
    let app = create_router(state);

    let addr = SocketAddr::from(([0, 0, 0, 0], config.server_port));
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {}", addr))?;
    info!("Server listening on http://{}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal(cleanup_handle))
        .await
        .context("server error")?;

    info!("Server shutdown complete");
    Ok(())
}

async fn connect_store(config: &Config) -> anyhow::Result<Arc<dyn Store>> {
    match &config.database_url {
        Some(url) => {
            let store = PostgresStore::connect(url, config.db_max_connections)
                .await
                .context("failed to connect to PostgreSQL")?;
            store
                .run_migrations()
                .await
                .context("failed to run migrations")?;
            info!("PostgreSQL store ready");
            let store: Arc<dyn Store> = Arc::new(store);
            Ok(store)
        }
        None => {
            warn!("DATABASE_URL not set, using volatile in-memory store");
            let store: Arc<dyn Store> = Arc::new(MemoryStore::new());
            Ok(store)
        }
    }
}

/// Returns the cache client and, for the in-process backend, the handle
/// of its cleanup task.
fn build_cache(
    config: &Config,
) -> anyhow::Result<(Arc<dyn CacheClient>, Option<JoinHandle<()>>)> {
    match &config.redis_url {
        Some(url) => {
            let cache: Arc<dyn CacheClient> = Arc::new(
                RedisCache::open(url, config.cache_timeout()).context("invalid REDIS_URL")?,
            );
            info!("Using Redis cache (connects on first use)");
            Ok((cache, None))
        }
        None => {
            let cache = Arc::new(MemoryCache::new());
            let handle = spawn_cleanup_task(cache.clone(), config.cleanup_interval);
            info!("Using in-process cache");
            let cache: Arc<dyn CacheClient> = cache;
            Ok((cache, Some(handle)))
        }
    }
}

/// Waits for shutdown signal (Ctrl+C or SIGTERM).
///
/// On shutdown signal, aborts the cleanup task if one is running.
async fn shutdown_signal(cleanup_handle: Option<JoinHandle<()>>) {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("Failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received Ctrl+C, initiating shutdown...");
        }
        _ = terminate => {
            info!("Received SIGTERM, initiating shutdown...");
        }
    }

    if let Some(handle) = cleanup_handle {
        handle.abort();
        warn!("Cleanup task aborted");
    }
}
