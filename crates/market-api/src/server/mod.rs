//! Server setup and initialization
//!
//! Provides the main application builder and server runner.

use std::net::SocketAddr;
use std::sync::Arc;

use axum::Router;
use market_cache::{RedisPool, RefreshTokenStore};
use market_common::{AppConfig, AppError, JwtService, LocalFileStorage};
use market_db::{
    create_pool, run_migrations, PgCategoryRepository, PgPhotoRepository, PgProductRepository,
    PgReactionRepository, PgUserRepository,
};
use market_service::ServiceContext;
use tokio::net::TcpListener;
use tower_http::services::ServeDir;
use tracing::info;

use crate::middleware::{apply_middleware, apply_rate_limit};
use crate::routes::{create_router, docs_routes, health_routes};
use crate::state::AppState;

/// Build the complete Axum application with all routes and middleware
pub fn create_app(state: AppState) -> Result<Router, AppError> {
    let config = state.config();

    let mut router = apply_rate_limit(create_router(), &config.rate_limit)?
        .merge(health_routes())
        .merge(docs_routes());

    // Uploaded images are served read-only when the public URL is a local path
    let public_url = config.storage.public_url.trim_end_matches('/');
    if public_url.starts_with('/') && !public_url.is_empty() {
        router = router.nest_service(public_url, ServeDir::new(&config.storage.upload_dir));
    }

    let router = apply_middleware(router, config);
    Ok(router.with_state(state))
}

/// Initialize all dependencies and create AppState
pub async fn create_app_state(config: AppConfig) -> Result<AppState, AppError> {
    info!("Connecting to PostgreSQL...");
    let db_config = market_db::DatabaseConfig::from(&config.database);
    let pool = create_pool(&db_config)
        .await
        .map_err(|e| AppError::Database(e.to_string()))?;
    info!("PostgreSQL connection established");

    if config.database.run_migrations {
        run_migrations(&pool)
            .await
            .map_err(|e| AppError::Database(format!("migration failed: {e}")))?;
    }

    info!("Connecting to Redis...");
    let redis_pool = RedisPool::from_config(&config.redis)
        .map_err(|e| AppError::Cache(e.to_string()))?;
    let shared_redis = Arc::new(redis_pool.clone());
    info!("Redis pool created");

    let storage = LocalFileStorage::from_config(&config.storage);
    storage
        .ensure_root()
        .await
        .map_err(|e| AppError::Storage(e.to_string()))?;

    let jwt_service = Arc::new(JwtService::new(
        &config.jwt.secret,
        config.jwt.access_token_expiry,
        config.jwt.refresh_token_expiry,
    ));

    let service_context = ServiceContext::builder()
        .user_repo(Arc::new(PgUserRepository::new(pool.clone())))
        .category_repo(Arc::new(PgCategoryRepository::new(pool.clone())))
        .product_repo(Arc::new(PgProductRepository::new(pool.clone())))
        .photo_repo(Arc::new(PgPhotoRepository::new(pool.clone())))
        .reaction_repo(Arc::new(PgReactionRepository::new(pool.clone())))
        .session_store(Arc::new(RefreshTokenStore::new(redis_pool)))
        .file_storage(Arc::new(storage))
        .max_upload_bytes(config.storage.max_file_size_bytes())
        .jwt_service(jwt_service)
        .build()
        .map_err(|e| AppError::Config(e.to_string()))?;

    Ok(AppState::new(service_context, config, pool, shared_redis))
}

/// Run the HTTP server
///
/// Connect info is attached so the rate limiter can key on the peer address.
pub async fn run_server(app: Router, addr: SocketAddr) -> Result<(), AppError> {
    info!("Starting HTTP server on {}", addr);

    let listener = TcpListener::bind(addr)
        .await
        .map_err(|e| AppError::Config(format!("Failed to bind to {addr}: {e}")))?;

    info!("Server listening on http://{}", addr);

    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .with_graceful_shutdown(shutdown_signal())
    .await
    .map_err(|e| AppError::Config(format!("Server error: {e}")))?;

    Ok(())
}

/// Run the complete server with configuration
pub async fn run(config: AppConfig) -> Result<(), AppError> {
    let addr: SocketAddr = config
        .server
        .address()
        .parse()
        .map_err(|e| AppError::Config(format!("Invalid server address: {e}")))?;

    let state = create_app_state(config).await?;
    let app = create_app(state)?;

    run_server(app, addr).await
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}
