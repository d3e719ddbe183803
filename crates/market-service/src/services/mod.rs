//! Business logic services
//!
//! This module contains all service layer implementations that handle
//! business logic, validation, and orchestration of domain operations.

pub mod auth;
pub mod category;
pub mod context;
pub mod error;
mod images;
pub mod product;
pub mod reaction;

#[cfg(test)]
mod test_support;

// Re-export all services for convenience
pub use auth::AuthService;
pub use category::CategoryService;
pub use context::{ServiceContext, ServiceContextBuilder};
pub use error::{flatten_validation_errors, FieldErrors, ServiceError, ServiceResult};
pub use product::ProductService;
pub use reaction::ReactionService;
