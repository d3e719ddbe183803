//! Category service

use std::collections::HashMap;

use market_core::entities::{Category, NewCategory};
use market_core::error::DomainError;
use market_core::value_objects::CategoryId;
use tracing::{info, instrument};
use validator::Validate;

use crate::dto::{CategoryDetailResponse, CategoryForm, CategoryResponse, ProductResponse};

use super::context::ServiceContext;
use super::error::ServiceResult;
use super::images::ImageStore;
use super::product::product_responses;

/// Storage folder for category images
const CATEGORY_FOLDER: &str = "categories";

/// Category service
pub struct CategoryService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> CategoryService<'a> {
    /// Create a new CategoryService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// List every category with its products, photos and counts
    #[instrument(skip(self))]
    pub async fn list(&self) -> ServiceResult<Vec<CategoryDetailResponse>> {
        let categories = self.ctx.category_repo().find_all().await?;
        self.with_products(&categories).await
    }

    /// Get one category with its products
    #[instrument(skip(self))]
    pub async fn get(&self, category_id: CategoryId) -> ServiceResult<CategoryDetailResponse> {
        let category = self.find(category_id).await?;
        let mut details = self.with_products(std::slice::from_ref(&category)).await?;
        Ok(details.pop().unwrap_or_else(|| {
            CategoryDetailResponse::new(&category, Vec::new(), self.ctx.file_storage())
        }))
    }

    /// Create a category with an optional image
    #[instrument(skip(self, form))]
    pub async fn create(&self, form: CategoryForm) -> ServiceResult<CategoryResponse> {
        form.validate()?;
        let CategoryForm { name, image } = form;

        let images = ImageStore::new(self.ctx);
        let uploads: Vec<_> = image.into_iter().collect();
        let mut paths = images.save_all(CATEGORY_FOLDER, "image", &uploads).await?;

        let new_category = NewCategory {
            name: name.unwrap_or_default().trim().to_string(),
            image: paths.pop(),
        };

        let category = match self.ctx.category_repo().create(&new_category).await {
            Ok(category) => category,
            Err(e) => {
                if let Some(path) = new_category.image {
                    images.discard(&[path]).await;
                }
                return Err(e.into());
            }
        };

        info!(category_id = %category.id, "Category created");

        Ok(CategoryResponse::new(&category, self.ctx.file_storage()))
    }

    /// Delete a category; products, photos and reactions cascade.
    /// Stored files are removed best effort afterwards.
    #[instrument(skip(self))]
    pub async fn delete(&self, category_id: CategoryId) -> ServiceResult<()> {
        let paths = self.ctx.category_repo().delete(category_id).await?;
        ImageStore::new(self.ctx).discard(&paths).await;

        info!(category_id = %category_id, files = paths.len(), "Category deleted");
        Ok(())
    }

    async fn find(&self, category_id: CategoryId) -> ServiceResult<Category> {
        self.ctx
            .category_repo()
            .find_by_id(category_id)
            .await?
            .ok_or_else(|| DomainError::CategoryNotFound(category_id).into())
    }

    async fn with_products(
        &self,
        categories: &[Category],
    ) -> ServiceResult<Vec<CategoryDetailResponse>> {
        let ids: Vec<CategoryId> = categories.iter().map(|c| c.id).collect();
        let products = self.ctx.product_repo().find_by_categories(&ids).await?;
        let responses = product_responses(self.ctx, &products).await?;

        let mut by_category: HashMap<CategoryId, Vec<ProductResponse>> = HashMap::new();
        for (product, response) in products.iter().zip(responses) {
            by_category.entry(product.category_id).or_default().push(response);
        }

        Ok(categories
            .iter()
            .map(|category| {
                let products = by_category.remove(&category.id).unwrap_or_default();
                CategoryDetailResponse::new(category, products, self.ctx.file_storage())
            })
            .collect())
    }
}
