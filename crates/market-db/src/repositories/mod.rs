//! Repository implementations
//!
//! PostgreSQL implementations of the repository traits defined in market-core.
//! Each repository handles database operations for a specific domain entity.

mod category;
mod error;
mod photo;
mod product;
mod reaction;
mod user;

pub use category::PgCategoryRepository;
pub use photo::PgPhotoRepository;
pub use product::PgProductRepository;
pub use reaction::PgReactionRepository;
pub use user::PgUserRepository;
