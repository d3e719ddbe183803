//! Reaction entity <- model mappers

use market_core::entities::{ReactionCounts, ReactionRecord};
use market_core::value_objects::{PhotoId, UserId};

use crate::models::{ReactionCountsModel, ReactionLookupModel, ReactionModel};

impl From<ReactionModel> for ReactionRecord {
    fn from(model: ReactionModel) -> Self {
        ReactionRecord {
            user_id: UserId::new(model.user_id),
            photo_id: PhotoId::new(model.photo_id),
            is_like: model.is_like,
            created_at: model.created_at,
        }
    }
}

impl From<ReactionCountsModel> for ReactionCounts {
    fn from(model: ReactionCountsModel) -> Self {
        ReactionCounts::new(model.likes, model.dislikes)
    }
}

impl ReactionLookupModel {
    /// The caller's reaction, if the left join matched one
    pub fn into_record(self) -> Option<ReactionRecord> {
        match (self.user_id, self.is_like, self.created_at) {
            (Some(user_id), Some(is_like), Some(created_at)) => Some(ReactionRecord {
                user_id: UserId::new(user_id),
                photo_id: PhotoId::new(self.photo_id),
                is_like,
                created_at,
            }),
            _ => None,
        }
    }
}
