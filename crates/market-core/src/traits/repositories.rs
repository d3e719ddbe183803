//! Repository traits (ports) - define the interface for data access
//!
//! These traits follow the Repository pattern from Domain-Driven Design.
//! The domain layer defines what it needs, and the infrastructure layer
//! provides the implementation.

use async_trait::async_trait;

use crate::entities::{
    Category, NewCategory, NewProduct, NewUser, Photo, PhotoSummary, Product, ProductChanges,
    ReactionOutcome, ReactionRecord, User,
};
use crate::error::DomainError;
use crate::value_objects::{CategoryId, PhotoId, ProductId, ReactionAction, UserId};

/// Result type for repository operations
pub type RepoResult<T> = Result<T, DomainError>;

// ============================================================================
// User Repository
// ============================================================================

#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Find user by ID
    async fn find_by_id(&self, id: UserId) -> RepoResult<Option<User>>;

    /// Find user by username (exact match)
    async fn find_by_username(&self, username: &str) -> RepoResult<Option<User>>;

    /// Check if username is already taken
    async fn username_exists(&self, username: &str) -> RepoResult<bool>;

    /// Check if email is already taken (case-insensitive)
    async fn email_exists(&self, email: &str) -> RepoResult<bool>;

    /// Create a new user, returning the stored row
    async fn create(&self, user: &NewUser, password_hash: &str) -> RepoResult<User>;

    /// Get password hash for authentication
    async fn get_password_hash(&self, id: UserId) -> RepoResult<Option<String>>;
}

// ============================================================================
// Category Repository
// ============================================================================

#[async_trait]
pub trait CategoryRepository: Send + Sync {
    /// List all categories ordered by id
    async fn find_all(&self) -> RepoResult<Vec<Category>>;

    /// Find category by ID
    async fn find_by_id(&self, id: CategoryId) -> RepoResult<Option<Category>>;

    /// Create a new category
    async fn create(&self, category: &NewCategory) -> RepoResult<Category>;

    /// Delete a category; products, photos and reactions cascade
    ///
    /// Returns the stored image paths of the category and of every photo
    /// removed with it.
    async fn delete(&self, id: CategoryId) -> RepoResult<Vec<String>>;
}

// ============================================================================
// Product Repository
// ============================================================================

#[async_trait]
pub trait ProductRepository: Send + Sync {
    /// List all products ordered by id
    async fn find_all(&self) -> RepoResult<Vec<Product>>;

    /// Find product by ID
    async fn find_by_id(&self, id: ProductId) -> RepoResult<Option<Product>>;

    /// List products in the given categories
    async fn find_by_categories(&self, category_ids: &[CategoryId]) -> RepoResult<Vec<Product>>;

    /// Create a product together with its photos in one transaction
    async fn create(&self, product: &NewProduct, images: &[String])
        -> RepoResult<(Product, Vec<Photo>)>;

    /// Replace scalar fields and append photos in one transaction.
    ///
    /// Fails with `TooManyImages` (and writes nothing) when the product would
    /// end up with more than `max_images` photos.
    async fn update(
        &self,
        id: ProductId,
        changes: &ProductChanges,
        new_images: &[String],
        max_images: usize,
    ) -> RepoResult<Product>;

    /// Delete a product; photos and reactions cascade
    async fn delete(&self, id: ProductId) -> RepoResult<()>;
}

// ============================================================================
// Photo Repository
// ============================================================================

#[async_trait]
pub trait PhotoRepository: Send + Sync {
    /// Find photo by ID
    async fn find_by_id(&self, id: PhotoId) -> RepoResult<Option<Photo>>;

    /// Photos of the given products with reaction counts, ordered by id
    async fn find_by_products(&self, product_ids: &[ProductId]) -> RepoResult<Vec<PhotoSummary>>;

    /// Number of photos attached to a product
    async fn count_by_product(&self, product_id: ProductId) -> RepoResult<i64>;
}

// ============================================================================
// Reaction Repository
// ============================================================================

#[async_trait]
pub trait ReactionRepository: Send + Sync {
    /// Find the caller's reaction. Fails with `PhotoNotFound` for unknown photos.
    async fn find(&self, user_id: UserId, photo_id: PhotoId) -> RepoResult<Option<ReactionRecord>>;

    /// Apply a like/dislike toggle atomically and return the new state and
    /// counts. Fails with `PhotoNotFound` for unknown photos.
    async fn apply_action(
        &self,
        user_id: UserId,
        photo_id: PhotoId,
        action: ReactionAction,
    ) -> RepoResult<ReactionOutcome>;
}
