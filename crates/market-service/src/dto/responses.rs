//! Response DTOs for API endpoints
//!
//! All response DTOs implement `Serialize` for JSON output and `ToSchema` for
//! the OpenAPI document. Image paths are turned into public URLs here.

use chrono::{DateTime, Utc};
use market_common::TokenPair;
use market_core::entities::{Category, PhotoSummary, Product, ReactionOutcome, User};
use market_core::traits::FileStorage;
use market_core::value_objects::ReactionState;
use serde::Serialize;
use utoipa::ToSchema;

// ============================================================================
// Common Response Types
// ============================================================================

/// Plain acknowledgement
#[derive(Debug, Serialize, ToSchema)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

// ============================================================================
// Auth / User Responses
// ============================================================================

/// Access/refresh token pair
#[derive(Debug, Serialize, ToSchema)]
pub struct TokenResponse {
    pub access_token: String,
    pub refresh_token: String,
    #[schema(example = "Bearer")]
    pub token_type: String,
    /// Access token lifetime in seconds
    pub expires_in: i64,
}

impl From<TokenPair> for TokenResponse {
    fn from(pair: TokenPair) -> Self {
        Self {
            access_token: pair.access_token,
            refresh_token: pair.refresh_token,
            token_type: pair.token_type,
            expires_in: pair.expires_in,
        }
    }
}

/// Profile of the authenticated user
#[derive(Debug, Serialize, ToSchema)]
pub struct UserResponse {
    pub id: i64,
    pub username: String,
    pub email: String,
    pub is_admin: bool,
    pub created_at: DateTime<Utc>,
}

impl From<&User> for UserResponse {
    fn from(user: &User) -> Self {
        Self {
            id: user.id.into_inner(),
            username: user.username.clone(),
            email: user.email.clone(),
            is_admin: user.is_admin,
            created_at: user.created_at,
        }
    }
}

// ============================================================================
// Catalog Responses
// ============================================================================

/// Product photo with its reaction counts
#[derive(Debug, Serialize, ToSchema)]
pub struct PhotoResponse {
    pub id: i64,
    /// Public URL of the image
    pub image: String,
    pub likes_count: i64,
    pub dislikes_count: i64,
}

impl PhotoResponse {
    pub fn new(summary: &PhotoSummary, storage: &dyn FileStorage) -> Self {
        Self {
            id: summary.photo.id.into_inner(),
            image: storage.url(&summary.photo.image),
            likes_count: summary.counts.likes,
            dislikes_count: summary.counts.dislikes,
        }
    }
}

/// Product with its photos
#[derive(Debug, Serialize, ToSchema)]
pub struct ProductResponse {
    pub id: i64,
    pub name: String,
    /// Decimal amount with two places, e.g. `"19.99"`
    #[schema(example = "19.99")]
    pub price: String,
    /// Category id
    pub category: i64,
    pub description: String,
    pub images: Vec<PhotoResponse>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl ProductResponse {
    /// Build from a product and the photos belonging to it
    pub fn new(product: &Product, photos: &[&PhotoSummary], storage: &dyn FileStorage) -> Self {
        Self {
            id: product.id.into_inner(),
            name: product.name.clone(),
            price: product.price.to_string(),
            category: product.category_id.into_inner(),
            description: product.description.clone(),
            images: photos
                .iter()
                .map(|summary| PhotoResponse::new(summary, storage))
                .collect(),
            created_at: product.created_at,
            updated_at: product.updated_at,
        }
    }
}

/// Category without nested products
#[derive(Debug, Serialize, ToSchema)]
pub struct CategoryResponse {
    pub id: i64,
    pub name: String,
    /// Public URL of the category image
    pub image: Option<String>,
}

impl CategoryResponse {
    pub fn new(category: &Category, storage: &dyn FileStorage) -> Self {
        Self {
            id: category.id.into_inner(),
            name: category.name.clone(),
            image: category.image.as_deref().map(|path| storage.url(path)),
        }
    }
}

/// Category with its products
#[derive(Debug, Serialize, ToSchema)]
pub struct CategoryDetailResponse {
    pub id: i64,
    pub name: String,
    pub image: Option<String>,
    pub products: Vec<ProductResponse>,
}

impl CategoryDetailResponse {
    pub fn new(category: &Category, products: Vec<ProductResponse>, storage: &dyn FileStorage) -> Self {
        let CategoryResponse { id, name, image } = CategoryResponse::new(category, storage);
        Self {
            id,
            name,
            image,
            products,
        }
    }
}

// ============================================================================
// Reaction Responses
// ============================================================================

/// The caller's current reaction on a photo
#[derive(Debug, Serialize, ToSchema)]
pub struct ReactionStateResponse {
    /// `liked`, `disliked` or null
    #[schema(value_type = Option<String>, example = "liked")]
    pub state: ReactionState,
}

/// Result of a like/dislike toggle
#[derive(Debug, Serialize, ToSchema)]
pub struct ReactionResponse {
    /// `liked`, `disliked` or null
    #[schema(value_type = Option<String>, example = "liked")]
    pub state: ReactionState,
    pub likes_count: i64,
    pub dislikes_count: i64,
}

impl From<ReactionOutcome> for ReactionResponse {
    fn from(outcome: ReactionOutcome) -> Self {
        Self {
            state: outcome.state,
            likes_count: outcome.counts.likes,
            dislikes_count: outcome.counts.dislikes,
        }
    }
}

// ============================================================================
// Health Check Responses
// ============================================================================

/// Liveness response
#[derive(Debug, Serialize, ToSchema)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
}

impl HealthResponse {
    pub fn healthy() -> Self {
        Self {
            status: "healthy".to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }
}

/// Per-dependency readiness
#[derive(Debug, Serialize, ToSchema)]
pub struct HealthChecks {
    pub database: bool,
    pub redis: bool,
}

/// Readiness response
#[derive(Debug, Serialize, ToSchema)]
pub struct ReadinessResponse {
    pub status: String,
    pub checks: HealthChecks,
}

impl ReadinessResponse {
    pub fn new(checks: HealthChecks) -> Self {
        let status = if checks.database && checks.redis {
            "ready"
        } else {
            "not_ready"
        };
        Self {
            status: status.to_string(),
            checks,
        }
    }

    pub fn is_ready(&self) -> bool {
        self.checks.database && self.checks.redis
    }
}
