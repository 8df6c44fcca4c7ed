//! Per-user fixed-window limit on AI-backed routes, counted in Redis.

use std::sync::Arc;
use std::time::{Duration, SystemTime, UNIX_EPOCH};

use redis::aio::MultiplexedConnection;
use redis::Client as RedisClient;
use tokio::sync::Mutex;
use tokio::time::timeout;
use tracing::warn;
use uuid::Uuid;

use crate::errors::AppError;

pub const RATE_LIMIT_AI: &str = "AI analysis limit reached for this hour, please try again later";

/// Upper bound on connect + INCR + EXPIRE before the request is let through.
const REDIS_TIMEOUT: Duration = Duration::from_millis(250);

#[derive(Clone)]
pub struct RateLimiter {
    redis: RedisClient,
    /// Opened on first use and reused; cleared after any failure so the next
    /// request reconnects.
    conn: Arc<Mutex<Option<MultiplexedConnection>>>,
    max_requests: u64,
    window_secs: u64,
    timeout: Duration,
}

impl RateLimiter {
    pub fn new(redis: RedisClient, max_requests: u64, window_secs: u64) -> Self {
        Self {
            redis,
            conn: Arc::new(Mutex::new(None)),
            max_requests,
            window_secs: window_secs.max(1),
            timeout: REDIS_TIMEOUT,
        }
    }

    #[cfg(test)]
    fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Counts one request for `user_id` and rejects it once the window is full.
    /// Redis failures and timeouts are logged and the request is let through.
    pub async fn check(&self, user_id: Uuid) -> Result<(), AppError> {
        let key = window_key(user_id, unix_now(), self.window_secs);

        let outcome = match timeout(self.timeout, self.increment(&key)).await {
            Ok(result) => result.map_err(|e| e.to_string()),
            Err(_) => Err(format!("timed out after {:?}", self.timeout)),
        };

        match outcome {
            Ok(count) if count > self.max_requests => {
                warn!(%user_id, count, "AI rate limit exceeded");
                Err(AppError::RateLimited(RATE_LIMIT_AI.to_string()))
            }
            Ok(_) => Ok(()),
            Err(e) => {
                self.conn.lock().await.take();
                warn!(%user_id, "Rate limiter unavailable, allowing request: {e}");
                Ok(())
            }
        }
    }

    async fn connection(&self) -> redis::RedisResult<MultiplexedConnection> {
        let mut cached = self.conn.lock().await;
        if let Some(conn) = cached.as_ref() {
            return Ok(conn.clone());
        }
        let conn = self.redis.get_multiplexed_async_connection().await?;
        *cached = Some(conn.clone());
        Ok(conn)
    }

    async fn increment(&self, key: &str) -> redis::RedisResult<u64> {
        let mut conn = self.connection().await?;
        let count: u64 = redis::cmd("INCR").arg(key).query_async(&mut conn).await?;
        if count == 1 {
            redis::cmd("EXPIRE")
                .arg(key)
                .arg(self.window_secs)
                .query_async::<_, ()>(&mut conn)
                .await?;
        }
        Ok(count)
    }
}

/// Key for the window containing `now`; every request in the same window shares it.
fn window_key(user_id: Uuid, now_secs: u64, window_secs: u64) -> String {
    format!("ratelimit:ai:{user_id}:{}", now_secs / window_secs)
}

fn unix_now() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0)
}
