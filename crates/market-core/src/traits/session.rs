//! Refresh session port

use async_trait::async_trait;

use super::RepoResult;
use crate::value_objects::UserId;

/// Server-side record of refresh sessions.
///
/// A refresh token is only honoured while its session is stored, and
/// `consume` removes it, so each refresh token works once.
#[async_trait]
pub trait SessionStore: Send + Sync {
    /// Register a session for `user_id`, expiring after `ttl_seconds`
    async fn create(&self, session_id: &str, user_id: UserId, ttl_seconds: u64) -> RepoResult<()>;

    /// Atomically fetch and delete a session, returning its owner
    async fn consume(&self, session_id: &str) -> RepoResult<Option<UserId>>;
}
