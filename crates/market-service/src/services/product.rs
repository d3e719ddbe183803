//! Product service
//!
//! Product CRUD with up to five photos per product.

use std::collections::HashMap;

use market_core::entities::{NewProduct, PhotoSummary, Product, ProductChanges, MAX_PRODUCT_IMAGES};
use market_core::error::DomainError;
use market_core::value_objects::{CategoryId, ProductId};
use tracing::{info, instrument};

use crate::dto::{ProductFields, ProductForm, ProductResponse};

use super::context::ServiceContext;
use super::error::{ServiceError, ServiceResult};
use super::images::ImageStore;

/// Storage folder for product photos
const PRODUCT_FOLDER: &str = "products";

fn unknown_category(id: CategoryId) -> ServiceError {
    ServiceError::field("category", format!("Invalid pk \"{id}\" - object does not exist."))
}

fn too_many_images(max: usize) -> ServiceError {
    ServiceError::field(
        "upload_images",
        format!("A product can have at most {max} images in total."),
    )
}

/// Build responses for `products`, attaching their photos and counts
pub(crate) async fn product_responses(
    ctx: &ServiceContext,
    products: &[Product],
) -> ServiceResult<Vec<ProductResponse>> {
    let ids: Vec<ProductId> = products.iter().map(|p| p.id).collect();
    let photos = ctx.photo_repo().find_by_products(&ids).await?;

    let mut by_product: HashMap<ProductId, Vec<&PhotoSummary>> = HashMap::new();
    for summary in &photos {
        by_product.entry(summary.photo.product_id).or_default().push(summary);
    }

    Ok(products
        .iter()
        .map(|product| {
            let photos = by_product.get(&product.id).map_or(&[][..], Vec::as_slice);
            ProductResponse::new(product, photos, ctx.file_storage())
        })
        .collect())
}

/// Product service
pub struct ProductService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> ProductService<'a> {
    /// Create a new ProductService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// List every product with its photos
    #[instrument(skip(self))]
    pub async fn list(&self) -> ServiceResult<Vec<ProductResponse>> {
        let products = self.ctx.product_repo().find_all().await?;
        product_responses(self.ctx, &products).await
    }

    /// Get one product with its photos
    #[instrument(skip(self))]
    pub async fn get(&self, product_id: ProductId) -> ServiceResult<ProductResponse> {
        let product = self.find(product_id).await?;
        self.respond(product).await
    }

    /// Create a product and store its photos
    #[instrument(skip(self, form))]
    pub async fn create(&self, form: ProductForm) -> ServiceResult<ProductResponse> {
        let fields = form.into_fields()?;
        self.ensure_category(fields.category_id).await?;

        let ProductFields {
            name,
            price,
            category_id,
            description,
            images,
        } = fields;

        let images_store = ImageStore::new(self.ctx);
        let paths = images_store
            .save_all(PRODUCT_FOLDER, "upload_images", &images)
            .await?;

        let new_product = NewProduct {
            name,
            price,
            description,
            category_id,
        };

        let (product, _) = match self.ctx.product_repo().create(&new_product, &paths).await {
            Ok(created) => created,
            Err(e) => {
                images_store.discard(&paths).await;
                return Err(map_write_error(e));
            }
        };

        info!(product_id = %product.id, images = paths.len(), "Product created");

        self.respond(product).await
    }

    /// Replace a product's fields and append new photos.
    ///
    /// The total photo count may not exceed the per-product maximum; a
    /// rejected update leaves the product untouched.
    #[instrument(skip(self, form))]
    pub async fn update(
        &self,
        product_id: ProductId,
        form: ProductForm,
    ) -> ServiceResult<ProductResponse> {
        self.find(product_id).await?;

        let fields = form.into_fields()?;
        self.ensure_category(fields.category_id).await?;

        let existing = self.ctx.photo_repo().count_by_product(product_id).await?;
        if !Product::can_attach(usize::try_from(existing).unwrap_or(usize::MAX), fields.images.len()) {
            return Err(too_many_images(MAX_PRODUCT_IMAGES));
        }

        let ProductFields {
            name,
            price,
            category_id,
            description,
            images,
        } = fields;

        let images_store = ImageStore::new(self.ctx);
        let paths = images_store
            .save_all(PRODUCT_FOLDER, "upload_images", &images)
            .await?;

        let changes = ProductChanges {
            name,
            price,
            description,
            category_id,
        };

        // The repository re-checks the count under a row lock
        let product = match self
            .ctx
            .product_repo()
            .update(product_id, &changes, &paths, MAX_PRODUCT_IMAGES)
            .await
        {
            Ok(product) => product,
            Err(e) => {
                images_store.discard(&paths).await;
                return Err(map_write_error(e));
            }
        };

        info!(product_id = %product.id, added = paths.len(), "Product updated");

        self.respond(product).await
    }

    /// Delete a product and, best effort, its stored photos
    #[instrument(skip(self))]
    pub async fn delete(&self, product_id: ProductId) -> ServiceResult<()> {
        let photos = self.ctx.photo_repo().find_by_products(&[product_id]).await?;

        self.ctx.product_repo().delete(product_id).await?;

        let paths: Vec<String> = photos.into_iter().map(|s| s.photo.image).collect();
        ImageStore::new(self.ctx).discard(&paths).await;

        info!(product_id = %product_id, "Product deleted");
        Ok(())
    }

    async fn find(&self, product_id: ProductId) -> ServiceResult<Product> {
        self.ctx
            .product_repo()
            .find_by_id(product_id)
            .await?
            .ok_or_else(|| DomainError::ProductNotFound(product_id).into())
    }

    async fn ensure_category(&self, category_id: CategoryId) -> ServiceResult<()> {
        match self.ctx.category_repo().find_by_id(category_id).await? {
            Some(_) => Ok(()),
            None => Err(unknown_category(category_id)),
        }
    }

    async fn respond(&self, product: Product) -> ServiceResult<ProductResponse> {
        let mut responses = product_responses(self.ctx, std::slice::from_ref(&product)).await?;
        responses
            .pop()
            .ok_or_else(|| ServiceError::internal("product response missing"))
    }
}

/// Category races and the image limit surface as field errors
fn map_write_error(e: DomainError) -> ServiceError {
    match e {
        DomainError::CategoryNotFound(id) => unknown_category(id),
        DomainError::TooManyImages { max } => too_many_images(max),
        other => other.into(),
    }
}
