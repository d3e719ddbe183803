//! Product entity - an item for sale within a category

use chrono::{DateTime, Utc};

use crate::value_objects::{CategoryId, Price, ProductId};

/// Maximum number of photos attached to one product
pub const MAX_PRODUCT_IMAGES: usize = 5;

/// Product entity
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    pub price: Price,
    pub description: String,
    pub category_id: CategoryId,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Insert payload for a product
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewProduct {
    pub name: String,
    pub price: Price,
    pub description: String,
    pub category_id: CategoryId,
}

/// Full replacement of a product's scalar fields
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProductChanges {
    pub name: String,
    pub price: Price,
    pub description: String,
    pub category_id: CategoryId,
}

impl Product {
    /// Whether `additional` more photos fit next to `existing` ones
    #[inline]
    pub fn can_attach(existing: usize, additional: usize) -> bool {
        existing + additional <= MAX_PRODUCT_IMAGES
    }
}
