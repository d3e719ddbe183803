//! Category entity - groups products

use chrono::{DateTime, Utc};

use crate::value_objects::CategoryId;

/// Category entity
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Category {
    pub id: CategoryId,
    pub name: String,
    /// Storage-relative path of the category image
    pub image: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Insert payload for a category
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewCategory {
    pub name: String,
    pub image: Option<String>,
}
