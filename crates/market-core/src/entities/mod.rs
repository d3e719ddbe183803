//! Domain entities - core business objects

mod category;
mod photo;
mod product;
mod reaction;
mod user;

pub use category::{Category, NewCategory};
pub use photo::{Photo, PhotoSummary};
pub use product::{NewProduct, Product, ProductChanges, MAX_PRODUCT_IMAGES};
pub use reaction::{ReactionCounts, ReactionOutcome, ReactionRecord};
pub use user::{NewUser, User};
