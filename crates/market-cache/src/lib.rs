//! # market-cache
//!
//! Redis layer holding refresh sessions.
//!
//! ## Example
//!
//! ```ignore
//! use market_cache::{RedisPool, RefreshTokenStore};
//! use market_core::SessionStore;
//!
//! let pool = RedisPool::from_config(&config.redis)?;
//! let sessions = RefreshTokenStore::new(pool);
//!
//! sessions.create(&session_id, user_id, 86_400).await?;
//! let owner = sessions.consume(&session_id).await?; // second call returns None
//! ```

pub mod pool;
pub mod session;

// Re-export pool types
pub use pool::{
    RedisPool, RedisPoolConfig, RedisPoolError, RedisResult, SharedRedisPool,
};

// Re-export session types
pub use session::{RefreshTokenData, RefreshTokenStore};
