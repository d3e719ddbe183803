//! Route handlers
//!
//! All HTTP request handlers organized by resource.

pub mod auth;
pub mod categories;
pub mod health;
pub mod photos;
pub mod products;
pub mod users;
