//! Reaction entity - a user's like or dislike on a product photo

use chrono::{DateTime, Utc};

use crate::value_objects::{PhotoId, ReactionState, UserId};

/// Stored reaction; at most one exists per (user, photo)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReactionRecord {
    pub user_id: UserId,
    pub photo_id: PhotoId,
    pub is_like: bool,
    pub created_at: DateTime<Utc>,
}

impl ReactionRecord {
    #[inline]
    pub fn state(&self) -> ReactionState {
        ReactionState::from_record(Some(self.is_like))
    }
}

/// Derived like/dislike totals for a photo
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ReactionCounts {
    pub likes: i64,
    pub dislikes: i64,
}

impl ReactionCounts {
    pub fn new(likes: i64, dislikes: i64) -> Self {
        Self { likes, dislikes }
    }
}

/// Result of a toggle: the caller's new state plus fresh totals
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReactionOutcome {
    pub state: ReactionState,
    pub counts: ReactionCounts,
}
