//! # market-common
//!
//! Shared utilities including configuration, error handling, authentication,
//! telemetry, and file storage.

pub mod auth;
pub mod config;
pub mod error;
pub mod storage;
pub mod telemetry;

// Re-export commonly used types at crate root
pub use auth::{
    hash_password, validate_password_strength, verify_password, Claims, JwtService, TokenPair,
    TokenType,
};
pub use config::{
    AppConfig, AppSettings, ConfigError, CorsConfig, DatabaseConfig, Environment, JwtConfig,
    LogFormat, RateLimitConfig, RedisConfig, ServerConfig, StorageConfig,
};
pub use error::{domain_status, AppError};
pub use storage::LocalFileStorage;
pub use telemetry::{try_init_tracing, TracingConfig, TracingError};
