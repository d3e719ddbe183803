//! Application state
//!
//! Holds the shared state for the Axum application: the service context,
//! configuration, and the pooled clients probed by the readiness check.

use std::sync::Arc;

use market_cache::SharedRedisPool;
use market_common::{AppConfig, JwtService};
use market_db::PgPool;
use market_service::ServiceContext;

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    /// Service context containing all dependencies
    service_context: Arc<ServiceContext>,
    /// Application configuration
    config: Arc<AppConfig>,
    db_pool: PgPool,
    redis_pool: SharedRedisPool,
}

impl AppState {
    /// Create a new AppState
    pub fn new(
        service_context: ServiceContext,
        config: AppConfig,
        db_pool: PgPool,
        redis_pool: SharedRedisPool,
    ) -> Self {
        Self {
            service_context: Arc::new(service_context),
            config: Arc::new(config),
            db_pool,
            redis_pool,
        }
    }

    /// Get the service context
    pub fn service_context(&self) -> &ServiceContext {
        &self.service_context
    }

    /// Get the application configuration
    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    pub fn db_pool(&self) -> &PgPool {
        &self.db_pool
    }

    pub fn redis_pool(&self) -> &SharedRedisPool {
        &self.redis_pool
    }

    /// Get the JWT service from the service context
    pub fn jwt_service(&self) -> &JwtService {
        self.service_context.jwt_service()
    }
}

impl std::fmt::Debug for AppState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppState")
            .field("service_context", &"ServiceContext")
            .field("config", &"AppConfig")
            .field("redis_pool", &self.redis_pool)
            .finish()
    }
}
