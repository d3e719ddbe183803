//! # market-core
//!
//! Domain layer containing entities, value objects, and repository traits.
//! This crate has zero dependencies on infrastructure (database, web framework, etc.).

pub mod entities;
pub mod error;
pub mod traits;
pub mod value_objects;

// Re-export commonly used types at crate root
pub use entities::{
    Category, NewCategory, NewProduct, NewUser, Photo, PhotoSummary, Product, ProductChanges,
    ReactionCounts, ReactionOutcome, ReactionRecord, User, MAX_PRODUCT_IMAGES,
};
pub use error::DomainError;
pub use traits::{
    CategoryRepository, FileStorage, PhotoRepository, ProductRepository, ReactionRepository,
    RepoResult, SessionStore, UserRepository,
};
pub use value_objects::{
    CategoryId, IdParseError, ImageFormat, PhotoId, Price, PriceError, ProductId, ReactionAction,
    ReactionEffect, ReactionState, Transition, UnknownReactionAction, UserId,
};
