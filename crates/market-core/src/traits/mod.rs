//! Ports implemented by the infrastructure crates

mod repositories;
mod session;
mod storage;

pub use repositories::{
    CategoryRepository, PhotoRepository, ProductRepository, ReactionRepository, RepoResult,
    UserRepository,
};
pub use session::SessionStore;
pub use storage::FileStorage;
