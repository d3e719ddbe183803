//! PostgreSQL implementation of ReactionRepository
//!
//! The like/dislike toggle runs as one transaction:
//!
//! 1. lock the photo row (`FOR UPDATE`), which serializes toggles on a photo
//! 2. read the caller's current reaction
//! 3. apply the state transition (create, flip or remove)
//! 4. recount likes/dislikes inside the same transaction
//!
//! Two concurrent double-submits therefore behave like two sequential clicks
//! and the (user_id, photo_id) primary key never sees a duplicate insert.

use async_trait::async_trait;
use sqlx::{PgConnection, PgPool};
use tracing::instrument;

use market_core::entities::{ReactionCounts, ReactionOutcome, ReactionRecord};
use market_core::error::DomainError;
use market_core::traits::{ReactionRepository, RepoResult};
use market_core::value_objects::{PhotoId, ReactionAction, ReactionEffect, ReactionState, UserId};

use crate::models::{ReactionCountsModel, ReactionLookupModel};

use super::error::map_db_error;

/// PostgreSQL implementation of ReactionRepository
#[derive(Clone)]
pub struct PgReactionRepository {
    pool: PgPool,
}

impl PgReactionRepository {
    /// Create a new PgReactionRepository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

async fn count_reactions(conn: &mut PgConnection, photo_id: PhotoId) -> RepoResult<ReactionCounts> {
    let model = sqlx::query_as::<_, ReactionCountsModel>(
        r"
        SELECT COUNT(*) FILTER (WHERE is_like) AS likes,
               COUNT(*) FILTER (WHERE NOT is_like) AS dislikes
        FROM photo_likes
        WHERE photo_id = $1
        ",
    )
    .bind(photo_id.into_inner())
    .fetch_one(conn)
    .await
    .map_err(map_db_error)?;

    Ok(ReactionCounts::from(model))
}

#[async_trait]
impl ReactionRepository for PgReactionRepository {
    #[instrument(skip(self))]
    async fn find(&self, user_id: UserId, photo_id: PhotoId) -> RepoResult<Option<ReactionRecord>> {
        let lookup = sqlx::query_as::<_, ReactionLookupModel>(
            r"
            SELECT i.id AS photo_id, l.user_id, l.is_like, l.created_at
            FROM product_images i
            LEFT JOIN photo_likes l ON l.photo_id = i.id AND l.user_id = $1
            WHERE i.id = $2
            ",
        )
        .bind(user_id.into_inner())
        .bind(photo_id.into_inner())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?
        .ok_or(DomainError::PhotoNotFound(photo_id))?;

        Ok(lookup.into_record())
    }

    #[instrument(skip(self))]
    async fn apply_action(
        &self,
        user_id: UserId,
        photo_id: PhotoId,
        action: ReactionAction,
    ) -> RepoResult<ReactionOutcome> {
        let mut tx = self.pool.begin().await.map_err(map_db_error)?;

        let photo: Option<(i64,)> =
            sqlx::query_as(r"SELECT id FROM product_images WHERE id = $1 FOR UPDATE")
                .bind(photo_id.into_inner())
                .fetch_optional(&mut *tx)
                .await
                .map_err(map_db_error)?;

        if photo.is_none() {
            return Err(DomainError::PhotoNotFound(photo_id));
        }

        let current: Option<(bool,)> = sqlx::query_as(
            r"SELECT is_like FROM photo_likes WHERE user_id = $1 AND photo_id = $2 FOR UPDATE",
        )
        .bind(user_id.into_inner())
        .bind(photo_id.into_inner())
        .fetch_optional(&mut *tx)
        .await
        .map_err(map_db_error)?;

        let transition = ReactionState::from_record(current.map(|(is_like,)| is_like)).apply(action);

        match transition.effect {
            ReactionEffect::Create(is_like) => {
                sqlx::query(
                    r"
                    INSERT INTO photo_likes (user_id, photo_id, is_like)
                    VALUES ($1, $2, $3)
                    ON CONFLICT (user_id, photo_id) DO UPDATE SET is_like = EXCLUDED.is_like
                    ",
                )
                .bind(user_id.into_inner())
                .bind(photo_id.into_inner())
                .bind(is_like)
                .execute(&mut *tx)
                .await
                .map_err(map_db_error)?;
            }
            ReactionEffect::Flip(is_like) => {
                sqlx::query(
                    r"UPDATE photo_likes SET is_like = $3 WHERE user_id = $1 AND photo_id = $2",
                )
                .bind(user_id.into_inner())
                .bind(photo_id.into_inner())
                .bind(is_like)
                .execute(&mut *tx)
                .await
                .map_err(map_db_error)?;
            }
            ReactionEffect::Remove => {
                sqlx::query(r"DELETE FROM photo_likes WHERE user_id = $1 AND photo_id = $2")
                    .bind(user_id.into_inner())
                    .bind(photo_id.into_inner())
                    .execute(&mut *tx)
                    .await
                    .map_err(map_db_error)?;
            }
        }

        let counts = count_reactions(&mut tx, photo_id).await?;

        tx.commit().await.map_err(map_db_error)?;

        tracing::debug!(
            state = ?transition.next,
            likes = counts.likes,
            dislikes = counts.dislikes,
            "Reaction applied"
        );

        Ok(ReactionOutcome {
            state: transition.next,
            counts,
        })
    }
}
