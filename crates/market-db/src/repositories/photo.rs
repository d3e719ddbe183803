//! PostgreSQL implementation of PhotoRepository

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::instrument;

use market_core::entities::{Photo, PhotoSummary};
use market_core::traits::{PhotoRepository, RepoResult};
use market_core::value_objects::{PhotoId, ProductId};

use crate::models::{PhotoModel, PhotoSummaryModel};

use super::error::map_db_error;

/// PostgreSQL implementation of PhotoRepository
#[derive(Clone)]
pub struct PgPhotoRepository {
    pool: PgPool,
}

impl PgPhotoRepository {
    /// Create a new PgPhotoRepository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl PhotoRepository for PgPhotoRepository {
    #[instrument(skip(self))]
    async fn find_by_id(&self, id: PhotoId) -> RepoResult<Option<Photo>> {
        let result = sqlx::query_as::<_, PhotoModel>(
            r"
            SELECT id, product_id, image, created_at
            FROM product_images
            WHERE id = $1
            ",
        )
        .bind(id.into_inner())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.map(Photo::from))
    }

    #[instrument(skip(self))]
    async fn find_by_products(&self, product_ids: &[ProductId]) -> RepoResult<Vec<PhotoSummary>> {
        if product_ids.is_empty() {
            return Ok(Vec::new());
        }

        let ids: Vec<i64> = product_ids.iter().map(|id| id.into_inner()).collect();

        let models = sqlx::query_as::<_, PhotoSummaryModel>(
            r"
            SELECT i.id, i.product_id, i.image, i.created_at,
                   COUNT(l.user_id) FILTER (WHERE l.is_like) AS likes,
                   COUNT(l.user_id) FILTER (WHERE NOT l.is_like) AS dislikes
            FROM product_images i
            LEFT JOIN photo_likes l ON l.photo_id = i.id
            WHERE i.product_id = ANY($1)
            GROUP BY i.id
            ORDER BY i.id
            ",
        )
        .bind(&ids)
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(models.into_iter().map(PhotoSummary::from).collect())
    }

    #[instrument(skip(self))]
    async fn count_by_product(&self, product_id: ProductId) -> RepoResult<i64> {
        let count: (i64,) =
            sqlx::query_as(r"SELECT COUNT(*) FROM product_images WHERE product_id = $1")
                .bind(product_id.into_inner())
                .fetch_one(&self.pool)
                .await
                .map_err(map_db_error)?;

        Ok(count.0)
    }
}
