//! Axum extractors for request handling
//!
//! Custom extractors for authentication, validation, path ids, and
//! multipart upload forms.

mod auth;
mod multipart;
mod path;
mod validated;

pub use auth::AuthUser;
pub use multipart::{FromMultipart, MultipartForm};
pub use path::IdPath;
pub use validated::ValidatedJson;
