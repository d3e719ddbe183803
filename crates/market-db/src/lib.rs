//! # market-db
//!
//! Database layer implementing repository traits with PostgreSQL via SQLx.
//!
//! ## Overview
//!
//! This crate provides PostgreSQL implementations for all repository traits
//! defined in `market-core`. It handles:
//!
//! - Connection pool management and schema migrations
//! - Database models with SQLx `FromRow` derives
//! - Entity ↔ Model mappers
//! - Repository implementations
//!
//! ## Usage
//!
//! ```rust,ignore
//! use market_db::pool::{create_pool, run_migrations, DatabaseConfig};
//! use market_db::repositories::PgReactionRepository;
//! use market_core::traits::ReactionRepository;
//!
//! async fn example(app_config: &market_common::AppConfig) -> Result<(), Box<dyn std::error::Error>> {
//!     let pool = create_pool(&DatabaseConfig::from(&app_config.database)).await?;
//!     run_migrations(&pool).await?;
//!     let reactions = PgReactionRepository::new(pool);
//!
//!     // Use the repository...
//!     Ok(())
//! }
//! ```

pub mod mappers;
pub mod models;
pub mod pool;
pub mod repositories;

// Re-export commonly used types
pub use pool::{create_pool, ping, run_migrations, DatabaseConfig, PgPool};
pub use repositories::{
    PgCategoryRepository, PgPhotoRepository, PgProductRepository, PgReactionRepository,
    PgUserRepository,
};
