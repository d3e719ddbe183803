//! Photo reaction service
//!
//! Like/dislike toggling on product photos. The state machine lives in
//! `market_core::ReactionState`; the repository applies it atomically.

use market_core::value_objects::{PhotoId, ReactionAction, ReactionState, UserId};
use tracing::{info, instrument};

use crate::dto::{ReactionResponse, ReactionStateResponse};

use super::context::ServiceContext;
use super::error::ServiceResult;

/// Reaction service
pub struct ReactionService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> ReactionService<'a> {
    /// Create a new ReactionService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// The caller's current reaction on a photo
    #[instrument(skip(self))]
    pub async fn get_state(
        &self,
        user_id: UserId,
        photo_id: PhotoId,
    ) -> ServiceResult<ReactionStateResponse> {
        let record = self.ctx.reaction_repo().find(user_id, photo_id).await?;
        let state = record.map_or(ReactionState::None, |r| r.state());
        Ok(ReactionStateResponse { state })
    }

    /// Toggle like/dislike and return the new state with fresh counts
    #[instrument(skip(self))]
    pub async fn apply_action(
        &self,
        user_id: UserId,
        photo_id: PhotoId,
        action: ReactionAction,
    ) -> ServiceResult<ReactionResponse> {
        let outcome = self
            .ctx
            .reaction_repo()
            .apply_action(user_id, photo_id, action)
            .await?;

        info!(
            user_id = %user_id,
            photo_id = %photo_id,
            action = %action,
            state = outcome.state.as_str().unwrap_or("none"),
            "Photo reaction applied"
        );

        Ok(ReactionResponse::from(outcome))
    }
}
