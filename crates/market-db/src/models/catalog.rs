//! Category, product and product image models

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sqlx::FromRow;

/// Database model for categories table
#[derive(Debug, Clone, FromRow)]
pub struct CategoryModel {
    pub id: i64,
    pub name: String,
    pub image: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Database model for products table
#[derive(Debug, Clone, FromRow)]
pub struct ProductModel {
    pub id: i64,
    pub name: String,
    pub price: Decimal,
    pub description: String,
    pub category_id: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Database model for product_images table
#[derive(Debug, Clone, FromRow)]
pub struct PhotoModel {
    pub id: i64,
    pub product_id: i64,
    pub image: String,
    pub created_at: DateTime<Utc>,
}

/// Product image joined with its aggregated reaction counts
#[derive(Debug, Clone, FromRow)]
pub struct PhotoSummaryModel {
    pub id: i64,
    pub product_id: i64,
    pub image: String,
    pub created_at: DateTime<Utc>,
    pub likes: i64,
    pub dislikes: i64,
}
