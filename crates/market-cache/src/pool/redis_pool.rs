//! Redis connection pool backed by deadpool-redis.
//!
//! Building the pool is lazy: no socket is opened until the first checkout,
//! so the API can start while Redis is still coming up and report it through
//! the readiness probe instead.

use std::sync::Arc;
use std::time::Duration;

use deadpool_redis::{Config, Pool, PoolConfig, Runtime, Timeouts};
use redis::AsyncCommands;
use serde::{de::DeserializeOwned, Serialize};

/// How long a checkout may wait for a free connection
const CHECKOUT_TIMEOUT: Duration = Duration::from_secs(5);

/// Settings for [`RedisPool`]
#[derive(Debug, Clone)]
pub struct RedisPoolConfig {
    /// Redis connection URL (e.g., `redis://localhost:6379`)
    pub url: String,
    pub max_connections: usize,
}

impl From<&market_common::RedisConfig> for RedisPoolConfig {
    fn from(config: &market_common::RedisConfig) -> Self {
        Self {
            url: config.url.clone(),
            max_connections: config.max_connections as usize,
        }
    }
}

/// Failures talking to Redis
#[derive(Debug, thiserror::Error)]
pub enum RedisPoolError {
    #[error("Failed to build Redis pool: {0}")]
    Build(String),

    #[error("No Redis connection available: {0}")]
    Checkout(#[from] deadpool_redis::PoolError),

    #[error("Redis command failed: {0}")]
    Command(#[from] redis::RedisError),

    #[error("Cached value could not be encoded: {0}")]
    Encoding(#[from] serde_json::Error),
}

pub type RedisResult<T> = Result<T, RedisPoolError>;

/// Cloneable handle over a deadpool-redis pool
#[derive(Clone)]
pub struct RedisPool {
    pool: Pool,
}

impl std::fmt::Debug for RedisPool {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let status = self.pool.status();
        f.debug_struct("RedisPool")
            .field("size", &status.size)
            .field("available", &status.available)
            .field("max_size", &status.max_size)
            .finish()
    }
}

impl RedisPool {
    pub fn new(config: RedisPoolConfig) -> RedisResult<Self> {
        let mut timeouts = Timeouts::default();
        timeouts.wait = Some(CHECKOUT_TIMEOUT);
        timeouts.create = Some(CHECKOUT_TIMEOUT);
        timeouts.recycle = Some(CHECKOUT_TIMEOUT);

        let mut pool_config = PoolConfig::new(config.max_connections);
        pool_config.timeouts = timeouts;

        let mut cfg = Config::from_url(&config.url);
        cfg.pool = Some(pool_config);

        let pool = cfg
            .create_pool(Some(Runtime::Tokio1))
            .map_err(|e| RedisPoolError::Build(e.to_string()))?;

        tracing::info!(
            host = %redact_url(&config.url),
            max_connections = config.max_connections,
            "Redis pool ready"
        );

        Ok(Self { pool })
    }

    /// Build a pool straight from the application's Redis settings
    pub fn from_config(config: &market_common::RedisConfig) -> RedisResult<Self> {
        Self::new(RedisPoolConfig::from(config))
    }

    pub async fn connection(&self) -> RedisResult<deadpool_redis::Connection> {
        Ok(self.pool.get().await?)
    }

    /// `PING` round trip, for the readiness probe
    pub async fn health_check(&self) -> RedisResult<()> {
        let mut conn = self.connection().await?;
        redis::cmd("PING").query_async::<String>(&mut conn).await?;
        Ok(())
    }

    /// Store `value` as JSON under `key`, expiring after `ttl_seconds`
    pub async fn put_json<V: Serialize>(
        &self,
        key: &str,
        value: &V,
        ttl_seconds: u64,
    ) -> RedisResult<()> {
        let payload = serde_json::to_string(value)?;
        let mut conn = self.connection().await?;
        conn.set_ex::<_, _, ()>(key, payload, ttl_seconds).await?;
        Ok(())
    }

    /// Read and remove the JSON value under `key` in one step (`GETDEL`)
    ///
    /// Two concurrent callers can never both observe the same value.
    pub async fn take_json<V: DeserializeOwned>(&self, key: &str) -> RedisResult<Option<V>> {
        let mut conn = self.connection().await?;
        let raw: Option<String> = redis::cmd("GETDEL").arg(key).query_async(&mut conn).await?;

        raw.map(|payload| serde_json::from_str(&payload))
            .transpose()
            .map_err(RedisPoolError::from)
    }
}

pub type SharedRedisPool = Arc<RedisPool>;

/// Strip credentials from a Redis URL before it reaches the logs
fn redact_url(url: &str) -> &str {
    url.rsplit_once('@').map_or(url, |(_, host)| host)
}
