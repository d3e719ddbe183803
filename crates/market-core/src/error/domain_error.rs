//! Domain errors - error types for the domain layer

use thiserror::Error;

use crate::value_objects::{CategoryId, PhotoId, ProductId, UserId};

/// Domain layer errors
#[derive(Debug, Error)]
pub enum DomainError {
    // =========================================================================
    // Not Found Errors
    // =========================================================================
    #[error("User not found: {0}")]
    UserNotFound(UserId),

    #[error("Category not found: {0}")]
    CategoryNotFound(CategoryId),

    #[error("Product not found: {0}")]
    ProductNotFound(ProductId),

    #[error("Photo not found: {0}")]
    PhotoNotFound(PhotoId),

    // =========================================================================
    // Validation Errors
    // =========================================================================
    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("Password too weak: {0}")]
    WeakPassword(String),

    #[error("A product can have at most {max} images")]
    TooManyImages { max: usize },

    #[error("Invalid image: {0}")]
    InvalidImage(String),

    // =========================================================================
    // Conflict Errors
    // =========================================================================
    #[error("Username already in use")]
    UsernameAlreadyExists,

    #[error("Email already in use")]
    EmailAlreadyExists,

    #[error("Name already in use: {0}")]
    NameAlreadyExists(String),

    // =========================================================================
    // Infrastructure Errors (wrapped)
    // =========================================================================
    #[error("Database error: {0}")]
    DatabaseError(String),

    #[error("Cache error: {0}")]
    CacheError(String),

    #[error("Storage error: {0}")]
    StorageError(String),

    #[error("Internal error: {0}")]
    InternalError(String),
}

impl DomainError {
    /// Get an error code string for API responses
    pub fn code(&self) -> &'static str {
        match self {
            // Not Found
            Self::UserNotFound(_) => "UNKNOWN_USER",
            Self::CategoryNotFound(_) => "UNKNOWN_CATEGORY",
            Self::ProductNotFound(_) => "UNKNOWN_PRODUCT",
            Self::PhotoNotFound(_) => "UNKNOWN_PHOTO",

            // Validation
            Self::ValidationError(_) => "VALIDATION_ERROR",
            Self::WeakPassword(_) => "WEAK_PASSWORD",
            Self::TooManyImages { .. } => "TOO_MANY_IMAGES",
            Self::InvalidImage(_) => "INVALID_IMAGE",

            // Conflict
            Self::UsernameAlreadyExists => "USERNAME_ALREADY_EXISTS",
            Self::EmailAlreadyExists => "EMAIL_ALREADY_EXISTS",
            Self::NameAlreadyExists(_) => "NAME_ALREADY_EXISTS",

            // Infrastructure
            Self::DatabaseError(_) => "DATABASE_ERROR",
            Self::CacheError(_) => "CACHE_ERROR",
            Self::StorageError(_) => "STORAGE_ERROR",
            Self::InternalError(_) => "INTERNAL_ERROR",
        }
    }

    /// Human-facing detail for a missing resource, e.g. `Photo not found`
    pub fn not_found_detail(&self) -> Option<&'static str> {
        match self {
            Self::UserNotFound(_) => Some("User not found"),
            Self::CategoryNotFound(_) => Some("Category not found"),
            Self::ProductNotFound(_) => Some("Product not found"),
            Self::PhotoNotFound(_) => Some("Photo not found"),
            _ => None,
        }
    }

    /// Check if this is a "not found" error
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            Self::UserNotFound(_)
                | Self::CategoryNotFound(_)
                | Self::ProductNotFound(_)
                | Self::PhotoNotFound(_)
        )
    }

    /// Check if this is a validation error
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            Self::ValidationError(_)
                | Self::WeakPassword(_)
                | Self::TooManyImages { .. }
                | Self::InvalidImage(_)
        )
    }

    /// Check if this is a conflict error
    pub fn is_conflict(&self) -> bool {
        matches!(
            self,
            Self::UsernameAlreadyExists | Self::EmailAlreadyExists | Self::NameAlreadyExists(_)
        )
    }
}
