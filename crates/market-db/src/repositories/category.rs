//! PostgreSQL implementation of CategoryRepository

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::instrument;

use market_core::entities::{Category, NewCategory};
use market_core::error::DomainError;
use market_core::traits::{CategoryRepository, RepoResult};
use market_core::value_objects::CategoryId;

use crate::models::CategoryModel;

use super::error::{map_db_error, map_unique_violation};

/// PostgreSQL implementation of CategoryRepository
#[derive(Clone)]
pub struct PgCategoryRepository {
    pool: PgPool,
}

impl PgCategoryRepository {
    /// Create a new PgCategoryRepository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CategoryRepository for PgCategoryRepository {
    #[instrument(skip(self))]
    async fn find_all(&self) -> RepoResult<Vec<Category>> {
        let models = sqlx::query_as::<_, CategoryModel>(
            r"
            SELECT id, name, image, created_at
            FROM categories
            ORDER BY id
            ",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(models.into_iter().map(Category::from).collect())
    }

    #[instrument(skip(self))]
    async fn find_by_id(&self, id: CategoryId) -> RepoResult<Option<Category>> {
        let result = sqlx::query_as::<_, CategoryModel>(
            r"
            SELECT id, name, image, created_at
            FROM categories
            WHERE id = $1
            ",
        )
        .bind(id.into_inner())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.map(Category::from))
    }

    #[instrument(skip(self))]
    async fn create(&self, category: &NewCategory) -> RepoResult<Category> {
        let model = sqlx::query_as::<_, CategoryModel>(
            r"
            INSERT INTO categories (name, image)
            VALUES ($1, $2)
            RETURNING id, name, image, created_at
            ",
        )
        .bind(&category.name)
        .bind(category.image.as_deref())
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            map_unique_violation(e, |_| DomainError::NameAlreadyExists(category.name.clone()))
        })?;

        Ok(Category::from(model))
    }

    #[instrument(skip(self))]
    async fn delete(&self, id: CategoryId) -> RepoResult<Vec<String>> {
        let mut tx = self.pool.begin().await.map_err(map_db_error)?;

        // Locking the category blocks products from being added to it; locking
        // its products blocks new photos. The path query then sees every row
        // the cascade will remove.
        let locked: Option<(Option<String>,)> =
            sqlx::query_as(r"SELECT image FROM categories WHERE id = $1 FOR UPDATE")
                .bind(id.into_inner())
                .fetch_optional(&mut *tx)
                .await
                .map_err(map_db_error)?;
        let Some((category_image,)) = locked else {
            return Err(DomainError::CategoryNotFound(id));
        };

        sqlx::query(r"SELECT id FROM products WHERE category_id = $1 FOR UPDATE")
            .bind(id.into_inner())
            .execute(&mut *tx)
            .await
            .map_err(map_db_error)?;

        let photo_images: Vec<String> = sqlx::query_scalar(
            r"
            SELECT pi.image
            FROM product_images pi
            JOIN products p ON p.id = pi.product_id
            WHERE p.category_id = $1
            ",
        )
        .bind(id.into_inner())
        .fetch_all(&mut *tx)
        .await
        .map_err(map_db_error)?;

        sqlx::query(r"DELETE FROM categories WHERE id = $1")
            .bind(id.into_inner())
            .execute(&mut *tx)
            .await
            .map_err(map_db_error)?;

        tx.commit().await.map_err(map_db_error)?;

        Ok(category_image.into_iter().chain(photo_images).collect())
    }
}
