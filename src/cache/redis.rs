//! Redis cache backend
//!
//! Talks to an external Redis through a [`ConnectionManager`]. The manager
//! is created on first use rather than at startup, so the server boots and
//! serves uncached traffic while Redis is down and picks it up once it
//! becomes reachable.

use std::future::Future;
use std::time::{Duration, Instant};

use async_trait::async_trait;
use redis::{aio::ConnectionManager, AsyncCommands, Client};
use tokio::sync::Mutex;
use tracing::{info, warn};

use crate::cache::CacheClient;
use crate::error::CacheError;

/// How long calls fail fast after a connect failure or a timed-out command
const RETRY_AFTER: Duration = Duration::from_secs(1);

#[derive(Default)]
struct ConnState {
    conn: Option<ConnectionManager>,
    down_until: Option<Instant>,
}

// == Redis Cache ==
pub struct RedisCache {
    client: Client,
    /// Only held for bookkeeping, never across network I/O
    state: Mutex<ConnState>,
    /// Upper bound on connecting and on each command
    timeout: Duration,
}

impl RedisCache {
    /// Parses `url` without touching the network.
    pub fn open(url: &str, timeout: Duration) -> Result<Self, CacheError> {
        Ok(Self {
            client: Client::open(url)?,
            state: Mutex::new(ConnState::default()),
            timeout,
        })
    }

    async fn connection(&self) -> Result<ConnectionManager, CacheError> {
        {
            let state = self.state.lock().await;
            if state.down_until.is_some_and(|until| Instant::now() < until) {
                return Err(CacheError::Down);
            }
            if let Some(conn) = state.conn.as_ref() {
                return Ok(conn.clone());
            }
        }

        // Concurrent callers may connect in parallel; the first success is kept
        match self.bounded(ConnectionManager::new(self.client.clone())).await {
            Ok(conn) => {
                let mut state = self.state.lock().await;
                state.down_until = None;
                Ok(state
                    .conn
                    .get_or_insert_with(|| {
                        info!("Connected to Redis");
                        conn
                    })
                    .clone())
            }
            Err(err) => {
                self.mark_down(&err).await;
                Err(err)
            }
        }
    }

    async fn mark_down(&self, err: &CacheError) {
        let mut state = self.state.lock().await;
        let now = Instant::now();
        if state.down_until.map_or(true, |until| until <= now) {
            warn!("Redis unreachable ({}), bypassing it for {:?}", err, RETRY_AFTER);
            state.down_until = Some(now + RETRY_AFTER);
        }
    }

    async fn bounded<T, F>(&self, fut: F) -> Result<T, CacheError>
    where
        F: Future<Output = redis::RedisResult<T>>,
    {
        match tokio::time::timeout(self.timeout, fut).await {
            Ok(result) => result.map_err(CacheError::from),
            Err(_) => Err(CacheError::Timeout),
        }
    }

    /// Runs a command; a timeout marks the server down.
    async fn command<T, F>(&self, fut: F) -> Result<T, CacheError>
    where
        F: Future<Output = redis::RedisResult<T>>,
    {
        let result = self.bounded(fut).await;
        if matches!(result, Err(CacheError::Timeout)) {
            self.mark_down(&CacheError::Timeout).await;
        }
        result
    }
}

#[async_trait]
impl CacheClient for RedisCache {
    fn name(&self) -> &'static str {
        "redis"
    }

    async fn get(&self, key: &str) -> Result<Option<String>, CacheError> {
        let mut conn = self.connection().await?;
        self.command(conn.get::<_, Option<String>>(key)).await
    }

    async fn set_with_ttl(&self, key: &str, value: &str, ttl: Duration) -> Result<(), CacheError> {
        let mut conn = self.connection().await?;
        // SET EX rejects 0; round sub-second TTLs up to one second
        let seconds = ttl.as_secs().max(1);
        self.command(conn.set_ex::<_, _, ()>(key, value, seconds))
            .await
    }

    async fn delete(&self, key: &str) -> Result<(), CacheError> {
        let mut conn = self.connection().await?;
        self.command(conn.del::<_, ()>(key)).await
    }
}
