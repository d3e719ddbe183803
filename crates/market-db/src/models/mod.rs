//! Database models - SQLx-compatible structs for PostgreSQL tables

mod catalog;
mod reaction;
mod user;

pub use catalog::{CategoryModel, PhotoModel, PhotoSummaryModel, ProductModel};
pub use reaction::{ReactionCountsModel, ReactionLookupModel, ReactionModel};
pub use user::UserModel;
