//! Refresh sessions in Redis.
//!
//! Each login creates a session keyed by its id; the refresh token carries
//! that id. Refreshing consumes the session with `GETDEL`, so a replayed
//! refresh token finds nothing.

use async_trait::async_trait;
use market_core::{DomainError, RepoResult, SessionStore, UserId};
use serde::{Deserialize, Serialize};

use crate::pool::{RedisPool, RedisPoolError};

/// Key prefix for refresh sessions
const REFRESH_SESSION_PREFIX: &str = "refresh_session:";

/// Stored refresh session data
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RefreshTokenData {
    /// User the session belongs to
    pub user_id: UserId,
    /// Session creation timestamp (Unix epoch seconds)
    pub created_at: i64,
}

impl RefreshTokenData {
    #[must_use]
    pub fn new(user_id: UserId) -> Self {
        Self {
            user_id,
            created_at: chrono::Utc::now().timestamp(),
        }
    }
}

/// Refresh session store backed by Redis
#[derive(Clone, Debug)]
pub struct RefreshTokenStore {
    pool: RedisPool,
}

impl RefreshTokenStore {
    #[must_use]
    pub fn new(pool: RedisPool) -> Self {
        Self { pool }
    }

    fn key(session_id: &str) -> String {
        format!("{REFRESH_SESSION_PREFIX}{session_id}")
    }
}

impl From<RedisPoolError> for DomainError {
    fn from(err: RedisPoolError) -> Self {
        DomainError::CacheError(err.to_string())
    }
}

#[async_trait]
impl SessionStore for RefreshTokenStore {
    async fn create(&self, session_id: &str, user_id: UserId, ttl_seconds: u64) -> RepoResult<()> {
        let data = RefreshTokenData::new(user_id);
        self.pool
            .put_json(&Self::key(session_id), &data, ttl_seconds)
            .await?;

        tracing::debug!(
            session_id = %session_id,
            user_id = %user_id,
            "Stored refresh session"
        );
        Ok(())
    }

    async fn consume(&self, session_id: &str) -> RepoResult<Option<UserId>> {
        let data: Option<RefreshTokenData> = self.pool.take_json(&Self::key(session_id)).await?;

        if data.is_some() {
            tracing::debug!(session_id = %session_id, "Consumed refresh session");
        }
        Ok(data.map(|d| d.user_id))
    }
}
