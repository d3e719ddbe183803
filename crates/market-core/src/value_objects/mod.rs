//! Value objects - immutable types that represent domain concepts

mod id;
mod image_format;
mod price;
mod reaction_state;

pub use id::{CategoryId, IdParseError, PhotoId, ProductId, UserId};
pub use image_format::ImageFormat;
pub use price::{Price, PriceError};
pub use reaction_state::{
    ReactionAction, ReactionEffect, ReactionState, Transition, UnknownReactionAction,
};
