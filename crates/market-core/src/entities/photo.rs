//! Photo entity - an image attached to a product

use chrono::{DateTime, Utc};

use super::ReactionCounts;
use crate::value_objects::{PhotoId, ProductId};

/// Product photo
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Photo {
    pub id: PhotoId,
    pub product_id: ProductId,
    /// Storage-relative path
    pub image: String,
    pub created_at: DateTime<Utc>,
}

/// Photo with its aggregated reaction counts
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PhotoSummary {
    pub photo: Photo,
    pub counts: ReactionCounts,
}
