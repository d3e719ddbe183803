//! Catalog entity <- model mappers

use market_core::entities::{Category, Photo, PhotoSummary, Product, ReactionCounts};
use market_core::error::DomainError;
use market_core::value_objects::{CategoryId, PhotoId, Price, ProductId};

use crate::models::{CategoryModel, PhotoModel, PhotoSummaryModel, ProductModel};

impl From<CategoryModel> for Category {
    fn from(model: CategoryModel) -> Self {
        Category {
            id: CategoryId::new(model.id),
            name: model.name,
            image: model.image,
            created_at: model.created_at,
        }
    }
}

impl TryFrom<ProductModel> for Product {
    type Error = DomainError;

    fn try_from(model: ProductModel) -> Result<Self, Self::Error> {
        let price = Price::new(model.price).map_err(|e| {
            DomainError::DatabaseError(format!("product {} has invalid price: {e}", model.id))
        })?;

        Ok(Product {
            id: ProductId::new(model.id),
            name: model.name,
            price,
            description: model.description,
            category_id: CategoryId::new(model.category_id),
            created_at: model.created_at,
            updated_at: model.updated_at,
        })
    }
}

impl From<PhotoModel> for Photo {
    fn from(model: PhotoModel) -> Self {
        Photo {
            id: PhotoId::new(model.id),
            product_id: ProductId::new(model.product_id),
            image: model.image,
            created_at: model.created_at,
        }
    }
}

impl From<PhotoSummaryModel> for PhotoSummary {
    fn from(model: PhotoSummaryModel) -> Self {
        PhotoSummary {
            photo: Photo {
                id: PhotoId::new(model.id),
                product_id: ProductId::new(model.product_id),
                image: model.image,
                created_at: model.created_at,
            },
            counts: ReactionCounts::new(model.likes, model.dislikes),
        }
    }
}

#[cfg(test)]
mod tests {
    use chrono::Utc;
    use rust_decimal::Decimal;

    use super::*;

    fn product_model(price: Decimal) -> ProductModel {
        ProductModel {
            id: 3,
            name: "Lamp".to_string(),
            price,
            description: String::new(),
            category_id: 1,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn test_product_from_model() {
        let product = Product::try_from(product_model(Decimal::new(1999, 2))).unwrap();
        assert_eq!(product.id, ProductId::new(3));
        assert_eq!(product.price.to_string(), "19.99");
        assert_eq!(product.category_id, CategoryId::new(1));
    }

    #[test]
    fn test_product_with_negative_price_is_rejected() {
        let err = Product::try_from(product_model(Decimal::new(-1, 0))).unwrap_err();
        assert!(matches!(err, DomainError::DatabaseError(_)));
    }

    #[test]
    fn test_photo_summary_counts() {
        let summary = PhotoSummary::from(PhotoSummaryModel {
            id: 7,
            product_id: 3,
            image: "products/a.png".to_string(),
            created_at: Utc::now(),
            likes: 2,
            dislikes: 1,
        });
        assert_eq!(summary.photo.id, PhotoId::new(7));
        assert_eq!(summary.counts, ReactionCounts::new(2, 1));
    }
}
