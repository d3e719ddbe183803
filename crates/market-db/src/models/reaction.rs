//! Photo reaction database models

use chrono::{DateTime, Utc};
use sqlx::FromRow;

/// Database model for photo_likes table
#[derive(Debug, Clone, FromRow)]
pub struct ReactionModel {
    pub user_id: i64,
    pub photo_id: i64,
    pub is_like: bool,
    pub created_at: DateTime<Utc>,
}

/// Photo row left-joined with the caller's reaction (if any)
#[derive(Debug, Clone, FromRow)]
pub struct ReactionLookupModel {
    pub photo_id: i64,
    pub user_id: Option<i64>,
    pub is_like: Option<bool>,
    pub created_at: Option<DateTime<Utc>>,
}

/// Aggregated like/dislike counts (from query)
#[derive(Debug, Clone, Copy, FromRow)]
pub struct ReactionCountsModel {
    pub likes: i64,
    pub dislikes: i64,
}
