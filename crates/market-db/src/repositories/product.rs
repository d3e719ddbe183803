//! PostgreSQL implementation of ProductRepository

use async_trait::async_trait;
use sqlx::{PgConnection, PgPool};
use tracing::instrument;

use market_core::entities::{NewProduct, Photo, Product, ProductChanges};
use market_core::error::DomainError;
use market_core::traits::{ProductRepository, RepoResult};
use market_core::value_objects::{CategoryId, ProductId};

use crate::models::{PhotoModel, ProductModel};

use super::error::{is_foreign_key_violation, map_db_error, map_unique_violation};

/// PostgreSQL implementation of ProductRepository
#[derive(Clone)]
pub struct PgProductRepository {
    pool: PgPool,
}

impl PgProductRepository {
    /// Create a new PgProductRepository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

/// Map a write error on the products table
fn map_write_error(e: sqlx::Error, name: &str, category_id: CategoryId) -> DomainError {
    if is_foreign_key_violation(&e) {
        return DomainError::CategoryNotFound(category_id);
    }
    map_unique_violation(e, |_| DomainError::NameAlreadyExists(name.to_string()))
}

async fn insert_images(
    conn: &mut PgConnection,
    product_id: i64,
    images: &[String],
) -> RepoResult<Vec<Photo>> {
    let mut photos = Vec::with_capacity(images.len());

    for image in images {
        let model = sqlx::query_as::<_, PhotoModel>(
            r"
            INSERT INTO product_images (product_id, image)
            VALUES ($1, $2)
            RETURNING id, product_id, image, created_at
            ",
        )
        .bind(product_id)
        .bind(image)
        .fetch_one(&mut *conn)
        .await
        .map_err(map_db_error)?;

        photos.push(Photo::from(model));
    }

    Ok(photos)
}

#[async_trait]
impl ProductRepository for PgProductRepository {
    #[instrument(skip(self))]
    async fn find_all(&self) -> RepoResult<Vec<Product>> {
        let models = sqlx::query_as::<_, ProductModel>(
            r"
            SELECT id, name, price, description, category_id, created_at, updated_at
            FROM products
            ORDER BY id
            ",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        models.into_iter().map(Product::try_from).collect()
    }

    #[instrument(skip(self))]
    async fn find_by_id(&self, id: ProductId) -> RepoResult<Option<Product>> {
        let result = sqlx::query_as::<_, ProductModel>(
            r"
            SELECT id, name, price, description, category_id, created_at, updated_at
            FROM products
            WHERE id = $1
            ",
        )
        .bind(id.into_inner())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        result.map(Product::try_from).transpose()
    }

    #[instrument(skip(self))]
    async fn find_by_categories(&self, category_ids: &[CategoryId]) -> RepoResult<Vec<Product>> {
        if category_ids.is_empty() {
            return Ok(Vec::new());
        }

        let ids: Vec<i64> = category_ids.iter().map(|id| id.into_inner()).collect();

        let models = sqlx::query_as::<_, ProductModel>(
            r"
            SELECT id, name, price, description, category_id, created_at, updated_at
            FROM products
            WHERE category_id = ANY($1)
            ORDER BY id
            ",
        )
        .bind(&ids)
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        models.into_iter().map(Product::try_from).collect()
    }

    #[instrument(skip(self, images), fields(images = images.len()))]
    async fn create(
        &self,
        product: &NewProduct,
        images: &[String],
    ) -> RepoResult<(Product, Vec<Photo>)> {
        let mut tx = self.pool.begin().await.map_err(map_db_error)?;

        let model = sqlx::query_as::<_, ProductModel>(
            r"
            INSERT INTO products (name, price, description, category_id)
            VALUES ($1, $2, $3, $4)
            RETURNING id, name, price, description, category_id, created_at, updated_at
            ",
        )
        .bind(&product.name)
        .bind(product.price.amount())
        .bind(&product.description)
        .bind(product.category_id.into_inner())
        .fetch_one(&mut *tx)
        .await
        .map_err(|e| map_write_error(e, &product.name, product.category_id))?;

        let photos = insert_images(&mut tx, model.id, images).await?;

        tx.commit().await.map_err(map_db_error)?;

        Ok((Product::try_from(model)?, photos))
    }

    #[instrument(skip(self, changes, new_images), fields(images = new_images.len()))]
    async fn update(
        &self,
        id: ProductId,
        changes: &ProductChanges,
        new_images: &[String],
        max_images: usize,
    ) -> RepoResult<Product> {
        let mut tx = self.pool.begin().await.map_err(map_db_error)?;

        // Row lock serializes concurrent updates of the same product so the
        // image count check below cannot be raced.
        let locked: Option<(i64,)> =
            sqlx::query_as(r"SELECT id FROM products WHERE id = $1 FOR UPDATE")
                .bind(id.into_inner())
                .fetch_optional(&mut *tx)
                .await
                .map_err(map_db_error)?;

        if locked.is_none() {
            return Err(DomainError::ProductNotFound(id));
        }

        let existing: (i64,) =
            sqlx::query_as(r"SELECT COUNT(*) FROM product_images WHERE product_id = $1")
                .bind(id.into_inner())
                .fetch_one(&mut *tx)
                .await
                .map_err(map_db_error)?;

        if existing.0 as usize + new_images.len() > max_images {
            return Err(DomainError::TooManyImages { max: max_images });
        }

        let model = sqlx::query_as::<_, ProductModel>(
            r"
            UPDATE products
            SET name = $2, price = $3, description = $4, category_id = $5, updated_at = NOW()
            WHERE id = $1
            RETURNING id, name, price, description, category_id, created_at, updated_at
            ",
        )
        .bind(id.into_inner())
        .bind(&changes.name)
        .bind(changes.price.amount())
        .bind(&changes.description)
        .bind(changes.category_id.into_inner())
        .fetch_one(&mut *tx)
        .await
        .map_err(|e| map_write_error(e, &changes.name, changes.category_id))?;

        insert_images(&mut tx, model.id, new_images).await?;

        tx.commit().await.map_err(map_db_error)?;

        Product::try_from(model)
    }

    #[instrument(skip(self))]
    async fn delete(&self, id: ProductId) -> RepoResult<()> {
        let result = sqlx::query(r"DELETE FROM products WHERE id = $1")
            .bind(id.into_inner())
            .execute(&self.pool)
            .await
            .map_err(map_db_error)?;

        if result.rows_affected() == 0 {
            return Err(DomainError::ProductNotFound(id));
        }

        Ok(())
    }
}
